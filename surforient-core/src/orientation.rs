//! Orientation results and the degenerate-neighborhood warning

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a neighborhood could not produce a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateReason {
    /// Anchor plus at most one neighbor
    TooFewPoints,
    /// Enough points, but they are collinear or coincident
    NoPlane,
}

/// Non-fatal notice that an orientation fell back to [`DEFAULT_NORMAL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegenerateNeighborhood {
    /// Index (or id) of the anchor point
    pub anchor: usize,
    /// Number of points in the group, anchor included
    pub size: usize,
    pub reason: DegenerateReason,
}

impl fmt::Display for DegenerateNeighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let why = match self.reason {
            DegenerateReason::TooFewPoints => "too few points",
            DegenerateReason::NoPlane => "points do not span a plane",
        };
        write!(
            f,
            "orientation of point {} cannot be estimated from {} point(s) ({}), using default vector [0, 0, 1]",
            self.anchor, self.size, why
        )
    }
}

/// Outcome of estimating one neighborhood's normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationEstimate {
    /// Unit normal with non-negative z
    pub normal: Vector3d,
    /// Set when the default normal was used
    pub warning: Option<DegenerateNeighborhood>,
}

impl OrientationEstimate {
    pub fn is_degenerate(&self) -> bool {
        self.warning.is_some()
    }
}

/// Anchor position paired with its estimated normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub position: Point3d,
    pub normal: Vector3d,
    pub degenerate: bool,
}

/// An orientation constraint ready to be appended to a host model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationRecord {
    pub position: Point3d,
    pub normal: Vector3d,
    pub surface: String,
    pub degenerate: bool,
}

impl OrientationRecord {
    pub fn new(orientation: Orientation, surface: impl Into<String>) -> Self {
        Self {
            position: orientation.position,
            normal: orientation.normal,
            surface: surface.into(),
            degenerate: orientation.degenerate,
        }
    }

    /// Dip angle in degrees, 0 for a horizontal surface
    pub fn dip(&self) -> f64 {
        self.normal.z.clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Dip direction in degrees clockwise from north (+Y), in `[0, 360)`
    pub fn azimuth(&self) -> f64 {
        self.normal.x.atan2(self.normal.y).to_degrees().rem_euclid(360.0)
    }
}
