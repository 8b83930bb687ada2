use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: 400,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f64, font_weight: u16) -> Self {
        Self {
            font_family: None,
            font_size,
            font_weight,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent measurer: every terminal column is `char_width_factor` ems wide.
///
/// Stat values and labels are single-line, so no wrapping is modeled. Bold weights widen the
/// estimate slightly.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.1
        } else {
            self.line_height_factor
        };
        let weight_factor = if style.font_weight >= 700 { 1.08 } else { 1.0 };

        let font_size = style.font_size.max(1.0);
        let columns = text.width();
        TextMetrics {
            width: columns as f64 * font_size * char_width_factor * weight_factor,
            height: font_size * line_height_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_columns_and_size() {
        let m = DeterministicTextMeasurer::default();
        let a = m.measure("1 234", &TextStyle::new(20.0, 400));
        assert!((a.width - 5.0 * 20.0 * 0.6).abs() < 1e-9);
        assert!((a.height - 22.0).abs() < 1e-9);

        let b = m.measure("1 234", &TextStyle::new(20.0, 800));
        assert!(b.width > a.width);
    }

    #[test]
    fn wide_glyphs_count_double() {
        let m = DeterministicTextMeasurer::default();
        let narrow = m.measure("ab", &TextStyle::new(10.0, 400));
        let wide = m.measure("漢字", &TextStyle::new(10.0, 400));
        assert!((wide.width - 2.0 * narrow.width).abs() < 1e-9);
    }

    #[test]
    fn empty_text_has_no_width() {
        let m = DeterministicTextMeasurer::default();
        assert_eq!(m.measure("", &TextStyle::default()).width, 0.0);
    }
}
