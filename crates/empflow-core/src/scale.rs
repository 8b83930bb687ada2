//! Responsive scale calculation.
//!
//! The container is compared against a fixed design reference (1800×900 by default); the
//! smaller of the two ratios is the base scale. The viewport class then picks a row from the
//! multiplier table, and every token is derived from the adjusted factors with a linear
//! formula and clamped to its own range.

use crate::tokens::{ScaleTokens, TokenName};
use crate::viewport::{Breakpoints, ContainerSize, Measurement, ViewportClass, ViewportProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampRange {
    pub min: f64,
    pub max: f64,
}

impl ClampRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamps `v` into the range. NaN collapses to `min`.
    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// One row of the per-class multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassFactors {
    /// Multiplier applied to the base scale.
    pub scale: f64,
    /// Lower bound for the adjusted scale.
    pub scale_floor: Option<f64>,
    /// Upper bound for the adjusted scale.
    pub scale_ceil: Option<f64>,
    pub line: f64,
    pub font: f64,
    pub card: f64,
}

impl Default for ClassFactors {
    fn default() -> Self {
        Self {
            scale: 1.0,
            scale_floor: None,
            scale_ceil: None,
            line: 1.0,
            font: 1.0,
            card: 1.0,
        }
    }
}

/// Extra line/card boost for tall viewports. Never applied to mobile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TallBoost {
    pub line: f64,
    pub card: f64,
}

impl Default for TallBoost {
    fn default() -> Self {
        Self {
            line: 1.2,
            card: 1.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenRanges {
    pub line_width: ClampRange,
    pub line_width_half: ClampRange,
    pub dot_size: ClampRange,
    pub dot_border: ClampRange,
    pub arrow_width: ClampRange,
    pub corner_radius: ClampRange,
    pub big_number_size: ClampRange,
    pub stat_size: ClampRange,
    pub label_size: ClampRange,
    pub suffix_size: ClampRange,
    pub icon_size: ClampRange,
    pub card_padding: ClampRange,
    pub scale_factor: ClampRange,
    pub card_scale: ClampRange,
}

impl Default for TokenRanges {
    fn default() -> Self {
        Self {
            line_width: ClampRange::new(1.0, 12.0),
            line_width_half: ClampRange::new(0.5, 6.0),
            dot_size: ClampRange::new(6.0, 24.0),
            dot_border: ClampRange::new(1.0, 8.0),
            arrow_width: ClampRange::new(12.0, 40.0),
            corner_radius: ClampRange::new(4.0, 30.0),
            big_number_size: ClampRange::new(24.0, 72.0),
            stat_size: ClampRange::new(16.0, 36.0),
            label_size: ClampRange::new(12.0, 24.0),
            suffix_size: ClampRange::new(12.0, 20.0),
            icon_size: ClampRange::new(16.0, 36.0),
            card_padding: ClampRange::new(8.0, 32.0),
            scale_factor: ClampRange::new(0.1, 3.0),
            card_scale: ClampRange::new(0.5, 2.0),
        }
    }
}

impl TokenRanges {
    pub fn get(&self, name: TokenName) -> ClampRange {
        match name {
            TokenName::LineWidth => self.line_width,
            TokenName::LineWidthHalf => self.line_width_half,
            TokenName::DotSize => self.dot_size,
            TokenName::DotBorder => self.dot_border,
            TokenName::ArrowWidth => self.arrow_width,
            TokenName::CornerRadius => self.corner_radius,
            TokenName::BigNumberSize => self.big_number_size,
            TokenName::StatSize => self.stat_size,
            TokenName::LabelSize => self.label_size,
            TokenName::SuffixSize => self.suffix_size,
            TokenName::IconSize => self.icon_size,
            TokenName::CardPadding => self.card_padding,
            TokenName::ScaleFactor => self.scale_factor,
            TokenName::CardScale => self.card_scale,
        }
    }
}

/// Factors after the class row and the tall boost have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedFactors {
    pub scale: f64,
    pub line: f64,
    pub font: f64,
    pub card: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScaleProfile {
    pub design_width: f64,
    pub design_height: f64,
    pub mobile: ClassFactors,
    pub tablet: ClassFactors,
    pub desktop: ClassFactors,
    pub large: ClassFactors,
    pub tall_boost: TallBoost,
    pub ranges: TokenRanges,
}

impl Default for ScaleProfile {
    fn default() -> Self {
        Self {
            design_width: 1800.0,
            design_height: 900.0,
            mobile: ClassFactors {
                scale: 0.6,
                scale_floor: Some(0.4),
                scale_ceil: None,
                line: 0.5,
                font: 0.7,
                card: 0.8,
            },
            tablet: ClassFactors {
                scale: 0.8,
                scale_floor: Some(0.6),
                scale_ceil: None,
                line: 0.7,
                font: 0.85,
                card: 0.9,
            },
            desktop: ClassFactors::default(),
            large: ClassFactors {
                scale: 1.3,
                scale_floor: None,
                scale_ceil: Some(2.0),
                line: 1.4,
                font: 1.2,
                card: 1.15,
            },
            tall_boost: TallBoost::default(),
            ranges: TokenRanges::default(),
        }
    }
}

impl ScaleProfile {
    pub fn class_factors(&self, class: ViewportClass) -> &ClassFactors {
        match class {
            ViewportClass::Mobile => &self.mobile,
            ViewportClass::Tablet => &self.tablet,
            ViewportClass::Desktop => &self.desktop,
            ViewportClass::Large => &self.large,
        }
    }

    /// `min(width / design_width, height / design_height)`.
    pub fn base_scale(&self, container: ContainerSize) -> f64 {
        let sx = container.width / self.design_width.max(f64::EPSILON);
        let sy = container.height / self.design_height.max(f64::EPSILON);
        sx.min(sy)
    }

    pub fn adjusted_factors(&self, base_scale: f64, viewport: ViewportProfile) -> AdjustedFactors {
        let row = self.class_factors(viewport.class);
        let mut scale = base_scale * row.scale;
        if let Some(floor) = row.scale_floor {
            scale = scale.max(floor);
        }
        if let Some(ceil) = row.scale_ceil {
            scale = scale.min(ceil);
        }

        let mut line = row.line;
        let mut card = row.card;
        if viewport.tall && !viewport.is_mobile() {
            line *= self.tall_boost.line;
            card *= self.tall_boost.card;
        }

        AdjustedFactors {
            scale,
            line,
            font: row.font,
            card,
        }
    }

    /// Derives the token set for one measurement.
    ///
    /// Without a usable container box the numeric tokens are the fixed defaults; the viewport
    /// profile is still classified so breakpoint overrides keep working.
    pub fn compute(&self, measurement: &Measurement, breakpoints: &Breakpoints) -> ScaleTokens {
        let viewport = breakpoints.classify(measurement.viewport);
        let Some(container) = measurement.measured_container() else {
            return ScaleTokens {
                viewport,
                ..ScaleTokens::default()
            };
        };

        let base = self.base_scale(container);
        let f = self.adjusted_factors(base, viewport);
        let r = &self.ranges;
        let sf = f.scale;
        let font_card = f.font * f.card;

        let line_width = r.line_width.clamp((3.0 + 3.0 * sf) * f.line);
        let tokens = ScaleTokens {
            line_width,
            line_width_half: r.line_width_half.clamp(line_width / 2.0),
            dot_size: r.dot_size.clamp((10.0 + 6.0 * sf) * sf),
            dot_border: r.dot_border.clamp(line_width * 0.66),
            arrow_width: r.arrow_width.clamp((28.0 + 24.0 * sf) * sf),
            corner_radius: r.corner_radius.clamp((10.0 + 6.0 * sf) * sf),
            big_number_size: r.big_number_size.clamp(48.0 * font_card),
            stat_size: r.stat_size.clamp(26.0 * font_card),
            label_size: r.label_size.clamp(18.0 * font_card),
            suffix_size: r.suffix_size.clamp(18.0 * font_card),
            icon_size: r.icon_size.clamp(26.0 * sf * f.card),
            card_padding: r.card_padding.clamp(24.0 * sf * f.card),
            scale_factor: r.scale_factor.clamp(sf),
            card_scale: r.card_scale.clamp(f.card),
            viewport,
            measured: true,
        };

        tracing::debug!(
            container_width = container.width,
            container_height = container.height,
            base_scale = base,
            class = %viewport.class,
            tall = viewport.tall,
            line_width = tokens.line_width,
            "computed scale tokens"
        );
        tokens
    }
}
