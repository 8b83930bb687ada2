use crate::viewport::ViewportProfile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Numeric design tokens that parameterize the template.
///
/// Pixel tokens are CSS pixels in frame space; `scale_factor` and `card_scale` are unitless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTokens {
    pub line_width: f64,
    pub line_width_half: f64,
    pub dot_size: f64,
    pub dot_border: f64,
    pub arrow_width: f64,
    pub corner_radius: f64,
    pub big_number_size: f64,
    pub stat_size: f64,
    pub label_size: f64,
    pub suffix_size: f64,
    pub icon_size: f64,
    pub card_padding: f64,
    pub scale_factor: f64,
    pub card_scale: f64,
    pub viewport: ViewportProfile,
    /// False when the set is the pre-measurement fallback.
    pub measured: bool,
}

impl Default for ScaleTokens {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            line_width_half: 1.5,
            dot_size: 10.0,
            dot_border: 2.0,
            arrow_width: 28.0,
            corner_radius: 12.0,
            big_number_size: 48.0,
            stat_size: 26.0,
            label_size: 18.0,
            suffix_size: 18.0,
            icon_size: 26.0,
            card_padding: 24.0,
            scale_factor: 1.0,
            card_scale: 1.0,
            viewport: ViewportProfile::default(),
            measured: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenName {
    LineWidth,
    LineWidthHalf,
    DotSize,
    DotBorder,
    ArrowWidth,
    CornerRadius,
    BigNumberSize,
    StatSize,
    LabelSize,
    SuffixSize,
    IconSize,
    CardPadding,
    ScaleFactor,
    CardScale,
}

impl TokenName {
    pub const ALL: [TokenName; 14] = [
        TokenName::LineWidth,
        TokenName::LineWidthHalf,
        TokenName::DotSize,
        TokenName::DotBorder,
        TokenName::ArrowWidth,
        TokenName::CornerRadius,
        TokenName::BigNumberSize,
        TokenName::StatSize,
        TokenName::LabelSize,
        TokenName::SuffixSize,
        TokenName::IconSize,
        TokenName::CardPadding,
        TokenName::ScaleFactor,
        TokenName::CardScale,
    ];

    /// Settings / JSON key of this token.
    pub fn key(self) -> &'static str {
        match self {
            TokenName::LineWidth => "lineWidth",
            TokenName::LineWidthHalf => "lineWidthHalf",
            TokenName::DotSize => "dotSize",
            TokenName::DotBorder => "dotBorder",
            TokenName::ArrowWidth => "arrowWidth",
            TokenName::CornerRadius => "cornerRadius",
            TokenName::BigNumberSize => "bigNumberSize",
            TokenName::StatSize => "statSize",
            TokenName::LabelSize => "labelSize",
            TokenName::SuffixSize => "suffixSize",
            TokenName::IconSize => "iconSize",
            TokenName::CardPadding => "cardPadding",
            TokenName::ScaleFactor => "scaleFactor",
            TokenName::CardScale => "cardScale",
        }
    }

    /// Name of the CSS custom property carrying this token.
    pub fn css_var(self) -> &'static str {
        match self {
            TokenName::LineWidth => "--lw",
            TokenName::LineWidthHalf => "--lw-half",
            TokenName::DotSize => "--dot",
            TokenName::DotBorder => "--dotbw",
            TokenName::ArrowWidth => "--arroww",
            TokenName::CornerRadius => "--cr-dyn",
            TokenName::BigNumberSize => "--big-num-size",
            TokenName::StatSize => "--stat-size",
            TokenName::LabelSize => "--label-size",
            TokenName::SuffixSize => "--suffix-size",
            TokenName::IconSize => "--icon-size",
            TokenName::CardPadding => "--card-padding",
            TokenName::ScaleFactor => "--scale-factor",
            TokenName::CardScale => "--card-scale",
        }
    }

    pub fn is_unitless(self) -> bool {
        matches!(self, TokenName::ScaleFactor | TokenName::CardScale)
    }
}

impl ScaleTokens {
    pub fn get(&self, name: TokenName) -> f64 {
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

    pub fn iter(&self) -> impl Iterator<Item = (TokenName, f64)> + '_ {
        TokenName::ALL.into_iter().map(|name| (name, self.get(name)))
    }

    /// Tokens as CSS custom properties, in a stable order.
    pub fn css_vars(&self) -> IndexMap<&'static str, String> {
        let mut out = IndexMap::with_capacity(TokenName::ALL.len() + 3);
        for (name, value) in self.iter() {
            let v = css_number(value);
            let v = if name.is_unitless() { v } else { format!("{v}px") };
            out.insert(name.css_var(), v);
        }
        let flag = |b: bool| if b { "1" } else { "0" }.to_string();
        out.insert("--is-mobile", flag(self.viewport.is_mobile()));
        out.insert("--is-tablet", flag(self.viewport.is_tablet()));
        out.insert("--is-large", flag(self.viewport.is_large()));
        out
    }

    /// `--lw: 3px; --lw-half: 1.5px; ...` for embedding into a style block.
    pub fn css_declarations(&self) -> String {
        let mut out = String::new();
        for (k, v) in self.css_vars() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(k);
            out.push_str(": ");
            out.push_str(&v);
            out.push(';');
        }
        out
    }
}

/// Shortest decimal form with at most 4 fractional digits (`3`, `1.5`, `7.9333`).
pub fn css_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let r = (v * 10_000.0).round() / 10_000.0;
    let mut s = format!("{r:.4}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" { "0".to_string() } else { s }
}
