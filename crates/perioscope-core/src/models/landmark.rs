use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A point in source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance_to(&self, other: &LandmarkPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The three landmarks marked on a periapical radiograph for one tooth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LandmarkSet {
    /// Cemento-enamel junction.
    pub cej: LandmarkPoint,
    /// Crestal bone level.
    pub bone: LandmarkPoint,
    /// Root apex.
    pub apex: LandmarkPoint,
}
