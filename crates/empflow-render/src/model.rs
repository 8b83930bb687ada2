use crate::animation::DotAnimation;
use empflow_core::geom::{Point, Rect};
use empflow_core::{Corner, ErpRow, ScaleTokens, StatIcon, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for LayoutPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for LayoutRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.origin.x,
            y: r.origin.y,
            width: r.size.width,
            height: r.size.height,
        }
    }
}

impl LayoutRect {
    pub fn center(&self) -> LayoutPoint {
        LayoutPoint {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Named visual positions of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotId {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    BottomCenter,
    Center,
}

impl SlotId {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotId::TopLeft => "top-left",
            SlotId::TopRight => "top-right",
            SlotId::BottomLeft => "bottom-left",
            SlotId::BottomRight => "bottom-right",
            SlotId::BottomCenter => "bottom-center",
            SlotId::Center => "center",
        }
    }
}

impl From<Corner> for SlotId {
    fn from(c: Corner) -> Self {
        match c {
            Corner::TopLeft => SlotId::TopLeft,
            Corner::TopRight => SlotId::TopRight,
            Corner::BottomLeft => SlotId::BottomLeft,
            Corner::BottomRight => SlotId::BottomRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardMode {
    Image,
    NumberCard,
}

impl CardMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CardMode::Image => "image",
            CardMode::NumberCard => "number-card",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutImage {
    pub href: String,
    /// Box the image is fitted into (aspect ratio preserved, centered).
    pub rect: LayoutRect,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// Left edge of the run.
    pub x: f64,
    /// Vertical center of the run.
    pub y: f64,
    pub width: f64,
    pub font_size: f64,
    pub font_weight: u16,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberCardContent {
    pub number: TextRun,
    /// Square area right of the number; empty when the corner has no image.
    pub icon_box: LayoutRect,
    pub icon: Option<LayoutImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub slot: SlotId,
    pub mode: CardMode,
    pub rect: LayoutRect,
    /// Full-card image (image mode only).
    pub image: Option<LayoutImage>,
    pub number: Option<NumberCardContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLayout {
    pub id: String,
    /// Polyline vertices; interior vertices are rounded with `corner_radius`.
    pub points: Vec<LayoutPoint>,
    pub corner_radius: f64,
    pub stroke_width: f64,
    pub dash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotLayout {
    pub id: String,
    pub radius: f64,
    pub stroke_width: f64,
    pub animation: DotAnimation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowLayout {
    pub id: String,
    pub center: LayoutPoint,
    pub size: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCellLayout {
    pub icon_kind: StatIcon,
    pub icon: Option<LayoutImage>,
    pub value: TextRun,
    pub suffix: Option<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRowLayout {
    pub rect: LayoutRect,
    pub cells: Vec<StatCellLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBlockLayout {
    pub corner: Corner,
    pub rect: LayoutRect,
    pub rows: Vec<StatRowLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpRowLayout {
    pub row: ErpRow,
    pub label: TextRun,
    pub value: TextRun,
    pub suffix: TextRun,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpLayout {
    pub rect: LayoutRect,
    pub rows: Vec<ErpRowLayout>,
}

/// Everything needed to draw one frame of the infographic, in frame pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowchartLayout {
    pub frame: LayoutRect,
    pub hub: LayoutPoint,
    pub measured: bool,
    pub tokens: ScaleTokens,
    pub theme: Theme,
    pub connectors: Vec<ConnectorLayout>,
    pub dots: Vec<DotLayout>,
    /// Corner cards (TL, TR, BL, BR) followed by the bottom-center card.
    pub cards: Vec<CardLayout>,
    pub center: CardLayout,
    pub arrows: Vec<ArrowLayout>,
    pub stats: Vec<StatsBlockLayout>,
    pub erp: Option<ErpLayout>,
}

impl FlowchartLayout {
    pub fn card(&self, slot: SlotId) -> Option<&CardLayout> {
        if slot == SlotId::Center {
            return Some(&self.center);
        }
        self.cards.iter().find(|c| c.slot == slot)
    }

    pub fn stats_for(&self, corner: Corner) -> Option<&StatsBlockLayout> {
        self.stats.iter().find(|s| s.corner == corner)
    }
}
