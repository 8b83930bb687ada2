//! Moving-dot keyframe paths.
//!
//! A path is data: a name, the keyframe offsets (fractions of one period) and the route
//! vertices the dot visits at those offsets. Every dot loops independently with a linear
//! timing function.

use crate::model::LayoutPoint;
use empflow_core::geom::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyframePath {
    /// Down a straight line to just past the hub, then rest for the remainder of the cycle.
    StraightDeep,
    /// Like `StraightDeep` with a slower travel phase.
    StraightDeeper,
    /// Along an L-shaped route: across, down, across.
    CornerZig,
}

impl KeyframePath {
    pub fn name(self) -> &'static str {
        match self {
            KeyframePath::StraightDeep => "straight-deep",
            KeyframePath::StraightDeeper => "straight-deeper",
            KeyframePath::CornerZig => "corner-zig",
        }
    }

    /// Keyframe offsets; one route vertex per offset.
    pub fn offsets(self) -> &'static [f64] {
        match self {
            KeyframePath::StraightDeep => &[0.0, 0.37, 1.0],
            KeyframePath::StraightDeeper => &[0.0, 0.60, 1.0],
            KeyframePath::CornerZig => &[0.0, 0.30, 0.70, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub offset: f64,
    pub point: LayoutPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotAnimation {
    pub path: KeyframePath,
    /// Keyframes in forward order (offsets ascending from 0 to 1).
    pub keyframes: Vec<Keyframe>,
    /// Seconds per cycle.
    pub period: f64,
    pub direction: Direction,
}

impl DotAnimation {
    /// Pairs the path offsets with route vertices (already in frame space).
    ///
    /// A route shorter than the offset list holds its last vertex.
    pub fn new(path: KeyframePath, route: &[Point], period: f64, direction: Direction) -> Self {
        let keyframes = path
            .offsets()
            .iter()
            .enumerate()
            .filter_map(|(i, &offset)| {
                let p = route.get(i).or_else(|| route.last())?;
                Some(Keyframe {
                    offset,
                    point: LayoutPoint::from(*p),
                })
            })
            .collect();
        Self {
            path,
            keyframes,
            period,
            direction,
        }
    }

    /// Keyframes in playback order, with offsets mapped for the direction.
    pub fn playback_keyframes(&self) -> Vec<Keyframe> {
        match self.direction {
            Direction::Normal => self.keyframes.clone(),
            Direction::Reverse => self
                .keyframes
                .iter()
                .rev()
                .map(|k| Keyframe {
                    offset: 1.0 - k.offset,
                    point: k.point,
                })
                .collect(),
        }
    }

    /// Dot position at phase `t` (wrapped into `[0, 1)`).
    pub fn position_at(&self, t: f64) -> Option<LayoutPoint> {
        let mut t = if t.is_finite() { t.rem_euclid(1.0) } else { 0.0 };
        if self.direction == Direction::Reverse {
            t = 1.0 - t;
        }

        let first = self.keyframes.first()?;
        if t <= first.offset {
            return Some(first.point);
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return Some(LayoutPoint {
                    x: a.point.x + (b.point.x - a.point.x) * u,
                    y: a.point.y + (b.point.y - a.point.y) * u,
                });
            }
        }
        self.keyframes.last().map(|k| k.point)
    }

    /// Where the dot sits at the start of a cycle (also the static position).
    pub fn start(&self) -> Option<LayoutPoint> {
        self.position_at(0.0)
    }
}
