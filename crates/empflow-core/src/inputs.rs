//! Caller-supplied slot inputs.
//!
//! Every field is optional. Absence is a normal state: the matching slot renders empty (or
//! not at all for stats), never as an error.

use crate::format::format_stat;
use crate::geom::Flip;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// A number or a pre-formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl DisplayValue {
    /// Text for stat rows: numbers get thousands grouping, strings pass through.
    pub fn formatted(&self) -> String {
        format_stat(self)
    }

    /// Text shown verbatim (number cards): integers without a fractional part.
    pub fn raw(&self) -> String {
        match self {
            DisplayValue::Number(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e21 {
                    format!("{v:.0}")
                } else {
                    v.to_string()
                }
            }
            DisplayValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The center slot accepts a bare reference or a reference with an accessible label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CenterImage {
    Src(String),
    Labeled {
        src: String,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl CenterImage {
    pub fn src(&self) -> &str {
        match self {
            CenterImage::Src(src) | CenterImage::Labeled { src, .. } => src,
        }
    }

    pub fn alt(&self) -> &str {
        match self {
            CenterImage::Labeled { alt: Some(alt), .. } if !alt.is_empty() => alt,
            _ => "Center",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SlotInputs {
    pub top_left: Option<String>,
    pub top_right: Option<String>,
    pub bottom_left: Option<String>,
    pub bottom_right: Option<String>,
    pub bottom_center: Option<String>,
    pub center: Option<CenterImage>,
    pub icon1: Option<String>,
    pub icon2: Option<String>,
    pub icon3: Option<String>,
    pub arrow: Option<String>,

    pub number1: Option<DisplayValue>,
    pub number2: Option<DisplayValue>,
    pub number3: Option<DisplayValue>,
    pub number4: Option<DisplayValue>,

    pub stat1: Option<DisplayValue>,
    pub stat2: Option<DisplayValue>,
    pub stat3: Option<DisplayValue>,
    #[serde(rename = "stat2_1")]
    pub stat2_1: Option<DisplayValue>,
    #[serde(rename = "stat2_2")]
    pub stat2_2: Option<DisplayValue>,
    #[serde(rename = "stat3_1")]
    pub stat3_1: Option<DisplayValue>,
    #[serde(rename = "stat3_2")]
    pub stat3_2: Option<DisplayValue>,
    #[serde(rename = "stat3_3")]
    pub stat3_3: Option<DisplayValue>,
    #[serde(rename = "stat4_1")]
    pub stat4_1: Option<DisplayValue>,
    #[serde(rename = "stat4_2")]
    pub stat4_2: Option<DisplayValue>,
    #[serde(rename = "stat5_1")]
    pub stat5_1: Option<DisplayValue>,
    #[serde(rename = "stat5_2")]
    pub stat5_2: Option<DisplayValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Mirroring that derives this corner from the top-left rules.
    pub fn flip(self) -> Flip {
        match self {
            Corner::TopLeft => Flip::NONE,
            Corner::TopRight => Flip::X,
            Corner::BottomLeft => Flip::Y,
            Corner::BottomRight => Flip::BOTH,
        }
    }

    pub fn slot_name(self) -> &'static str {
        match self {
            Corner::TopLeft => "topLeft",
            Corner::TopRight => "topRight",
            Corner::BottomLeft => "bottomLeft",
            Corner::BottomRight => "bottomRight",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Corner::TopLeft => "tl",
            Corner::TopRight => "tr",
            Corner::BottomLeft => "bl",
            Corner::BottomRight => "br",
        }
    }
}

/// Which of the shared icon images a stat cell uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatIcon {
    /// `icon1`
    Money,
    /// `icon2`
    Boxes,
    /// `icon3`
    People,
}

impl StatIcon {
    pub fn alt(self) -> &'static str {
        match self {
            StatIcon::Money => "money",
            StatIcon::Boxes => "boxes",
            StatIcon::People => "people",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCell<'a> {
    pub icon: StatIcon,
    pub value: &'a DisplayValue,
    /// Followed by the currency suffix.
    pub currency: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErpRow {
    Orders,
    Sales,
}

fn cell(icon: StatIcon, v: &Option<DisplayValue>) -> Option<StatCell<'_>> {
    v.as_ref().map(|value| StatCell {
        icon,
        value,
        currency: icon == StatIcon::Money,
    })
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl SlotInputs {
    pub fn parse(text: &str, format: InputFormat) -> Result<Self> {
        Ok(match format {
            InputFormat::Json => serde_json::from_str(text)?,
            InputFormat::Yaml => {
                // An empty YAML document means "no inputs".
                if text.trim().is_empty() {
                    Self::default()
                } else {
                    serde_yaml::from_str(text)?
                }
            }
            InputFormat::Json5 => json5::from_str(text)?,
        })
    }

    pub fn corner_image(&self, corner: Corner) -> Option<&str> {
        match corner {
            Corner::TopLeft => non_empty(&self.top_left),
            Corner::TopRight => non_empty(&self.top_right),
            Corner::BottomLeft => non_empty(&self.bottom_left),
            Corner::BottomRight => non_empty(&self.bottom_right),
        }
    }

    pub fn corner_number(&self, corner: Corner) -> Option<&DisplayValue> {
        match corner {
            Corner::TopLeft => self.number1.as_ref(),
            Corner::BottomLeft => self.number2.as_ref(),
            Corner::TopRight => self.number3.as_ref(),
            Corner::BottomRight => self.number4.as_ref(),
        }
    }

    /// Stat rows for a corner, with absent stats (and rows left empty by them) dropped.
    ///
    /// An empty result means the corner has no stats block at all.
    pub fn corner_stat_rows(&self, corner: Corner) -> Vec<Vec<StatCell<'_>>> {
        let rows: Vec<Vec<Option<StatCell<'_>>>> = match corner {
            Corner::TopLeft => vec![
                vec![cell(StatIcon::Money, &self.stat1)],
                vec![
                    cell(StatIcon::Boxes, &self.stat2),
                    cell(StatIcon::People, &self.stat3),
                ],
            ],
            Corner::BottomLeft => vec![
                vec![cell(StatIcon::Money, &self.stat3_1)],
                vec![
                    cell(StatIcon::Boxes, &self.stat3_2),
                    cell(StatIcon::People, &self.stat3_3),
                ],
            ],
            Corner::TopRight => vec![
                vec![cell(StatIcon::Money, &self.stat2_1)],
                vec![cell(StatIcon::Boxes, &self.stat2_2)],
            ],
            Corner::BottomRight => vec![
                vec![cell(StatIcon::Money, &self.stat4_1)],
                vec![cell(StatIcon::Boxes, &self.stat4_2)],
            ],
        };

        rows.into_iter()
            .map(|row| row.into_iter().flatten().collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect()
    }

    pub fn icon(&self, icon: StatIcon) -> Option<&str> {
        match icon {
            StatIcon::Money => non_empty(&self.icon1),
            StatIcon::Boxes => non_empty(&self.icon2),
            StatIcon::People => non_empty(&self.icon3),
        }
    }

    pub fn bottom_center_image(&self) -> Option<&str> {
        non_empty(&self.bottom_center)
    }

    pub fn center_image(&self) -> Option<&CenterImage> {
        self.center.as_ref().filter(|c| !c.src().trim().is_empty())
    }

    pub fn arrow_image(&self) -> Option<&str> {
        non_empty(&self.arrow)
    }

    pub fn erp_rows(&self) -> Vec<(ErpRow, &DisplayValue)> {
        let mut out = Vec::with_capacity(2);
        if let Some(v) = self.stat5_1.as_ref() {
            out.push((ErpRow::Orders, v));
        }
        if let Some(v) = self.stat5_2.as_ref() {
            out.push((ErpRow::Sales, v));
        }
        out
    }

    /// Visits every image reference (for asset embedding).
    pub fn image_refs_mut(&mut self) -> impl Iterator<Item = &mut String> {
        let center = match self.center.as_mut() {
            Some(CenterImage::Src(src)) | Some(CenterImage::Labeled { src, .. }) => Some(src),
            None => None,
        };
        [
            self.top_left.as_mut(),
            self.top_right.as_mut(),
            self.bottom_left.as_mut(),
            self.bottom_right.as_mut(),
            self.bottom_center.as_mut(),
            self.icon1.as_mut(),
            self.icon2.as_mut(),
            self.icon3.as_mut(),
            self.arrow.as_mut(),
            center,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Json,
    Yaml,
    Json5,
}

impl InputFormat {
    /// Picks a format from a file extension; unknown extensions fall back to JSON.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json5" => Ok(Self::Json5),
            other => Err(Error::UnsupportedInputFormat {
                format: other.to_string(),
            }),
        }
    }
}
