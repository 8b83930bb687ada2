use serde::{Deserialize, Serialize};

/// Static styling of the template. Colors are CSS color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Theme {
    pub background: String,
    pub card_background: String,
    pub line_color: String,
    pub dot_color: String,
    pub number_color: String,
    pub value_color: String,
    pub muted_color: String,
    pub font_family: String,
    /// Shadow opacity under cards (0..1).
    pub shadow_opacity: f64,
    /// Shadow blur radius at `scale_factor == 1`.
    pub shadow_blur: f64,
    pub currency_suffix: String,
    pub orders_label: String,
    pub sales_label: String,
    /// Period of one dot cycle, in seconds.
    pub animation_period: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            card_background: "#fff".to_string(),
            line_color: "#70808f".to_string(),
            dot_color: "#fc4d57".to_string(),
            number_color: "#2b2b2b".to_string(),
            value_color: "#fc4d57".to_string(),
            muted_color: "#9397a1".to_string(),
            font_family: "\"Open Sans\", system-ui".to_string(),
            shadow_opacity: 0.12,
            shadow_blur: 24.0,
            currency_suffix: "ZŁ".to_string(),
            orders_label: "ZAMÓWIENIA:".to_string(),
            sales_label: "SPRZEDAŻ:".to_string(),
            animation_period: 4.0,
        }
    }
}
