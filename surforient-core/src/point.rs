//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// The orientation assigned to neighborhoods too small to fit a plane
pub const DEFAULT_NORMAL: Vector3d = Vector3::new(0.0, 0.0, 1.0);

/// A sampled point on a labelled geological surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Stable external key of the point, e.g. its row in the host table
    pub id: usize,
    pub position: Point3d,
    /// Name of the surface the point was picked on
    pub surface: String,
}

impl SurfacePoint {
    pub fn new(id: usize, position: Point3d, surface: impl Into<String>) -> Self {
        Self {
            id,
            position,
            surface: surface.into(),
        }
    }
}

/// Returns true when all three coordinates are finite
pub fn is_finite_point(point: &Point3d) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}

/// Squared Euclidean distance, evaluated in a fixed component order so that
/// every search backend ranks candidates identically.
#[inline]
pub fn distance_squared(a: &Point3d, b: &Point3d) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}
