//! Geometry aliases shared by the token calculator and the layout code.
//!
//! All coordinates are CSS pixels in the rendering frame (the measured container).

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;
pub type Transform = euclid::Transform2D<f64, Unit, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    euclid::rect(x, y, w, h)
}

/// Rectangle of size `w`×`h` centered on `(cx, cy)`.
pub fn centered_rect(cx: f64, cy: f64, w: f64, h: f64) -> Rect {
    euclid::rect(cx - w / 2.0, cy - h / 2.0, w, h)
}

/// Horizontal and/or vertical mirroring around a pivot.
///
/// The infographic draws its four corners from one set of top-left rules; the other corners
/// are the same geometry flipped around the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Flip {
    pub x: bool,
    pub y: bool,
}

impl Flip {
    pub const NONE: Flip = Flip { x: false, y: false };
    pub const X: Flip = Flip { x: true, y: false };
    pub const Y: Flip = Flip { x: false, y: true };
    pub const BOTH: Flip = Flip { x: true, y: true };

    /// Mirror transform around `pivot`.
    pub fn transform_around(self, pivot: Point) -> Transform {
        let sx = if self.x { -1.0 } else { 1.0 };
        let sy = if self.y { -1.0 } else { 1.0 };
        Transform::translation(-pivot.x, -pivot.y)
            .then_scale(sx, sy)
            .then_translate(vector(pivot.x, pivot.y))
    }

    pub fn apply_point(self, pivot: Point, p: Point) -> Point {
        self.transform_around(pivot).transform_point(p)
    }

    pub fn apply_rect(self, pivot: Point, r: &Rect) -> Rect {
        self.transform_around(pivot).outer_transformed_rect(r)
    }
}
