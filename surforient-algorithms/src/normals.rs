//! Orientation (normal vector) estimation from neighbor groups
//!
//! The normal is the cross product of two rows of the neighborhood's
//! covariance matrix. For points lying on a plane every covariance row lies in
//! that plane, so the cross product of two independent rows is the plane
//! normal. Normals are flipped to point upwards (non-negative z).

use log::{debug, warn};
use nalgebra::Matrix3;
use surforient_core::{
    DegenerateNeighborhood, DegenerateReason, NeighborGroup, Orientation, OrientationEstimate,
    Point3d, Vector3d, DEFAULT_NORMAL,
};

/// Smallest neighborhood (anchor included) that can define a plane
pub const MIN_PLANE_POINTS: usize = 3;

/// Relative size below which a row cross product counts as vanishing
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Covariance row pairs tried in order; (0, 1) is the primary choice
const ROW_PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Sample covariance (n - 1 denominator) of a set of points.
///
/// Returns `None` for fewer than two points.
pub fn covariance_matrix(points: &[Point3d]) -> Option<Matrix3<f64>> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let centroid = points.iter().fold(Vector3d::zeros(), |acc, p| acc + p.coords) / n;

    let mut covariance = Matrix3::<f64>::zeros();
    for point in points {
        let deviation = point.coords - centroid;
        covariance += deviation * deviation.transpose();
    }

    Some(covariance / (n - 1.0))
}

/// Unit normal from the first pair of covariance rows that are not parallel
fn plane_normal(covariance: &Matrix3<f64>) -> Option<Vector3d> {
    ROW_PAIRS.iter().find_map(|&(a, b)| {
        let row_a: Vector3d = covariance.row(a).transpose();
        let row_b: Vector3d = covariance.row(b).transpose();
        let scale = row_a.norm() * row_b.norm();
        let normal = row_a.cross(&row_b);
        let length = normal.norm();

        if scale > 0.0 && length > PARALLEL_TOLERANCE * scale {
            Some(normal / length)
        } else {
            None
        }
    })
}

/// Flip a normal so it faces upwards (non-negative z)
fn upward(normal: Vector3d) -> Vector3d {
    if normal.z < 0.0 {
        -normal
    } else {
        normal
    }
}

fn degenerate(group: &NeighborGroup, reason: DegenerateReason) -> OrientationEstimate {
    let warning = DegenerateNeighborhood {
        anchor: group.anchor().index,
        size: group.len(),
        reason,
    };
    warn!("{}", warning);

    OrientationEstimate {
        normal: DEFAULT_NORMAL,
        warning: Some(warning),
    }
}

/// Estimate the surface normal of one neighborhood
///
/// Groups with fewer than [`MIN_PLANE_POINTS`] points, or whose points do not
/// span a plane, get the default normal `(0, 0, 1)` and a
/// [`DegenerateNeighborhood`] warning instead of an error.
///
/// # Example
/// ```rust
/// use surforient_core::{NeighborGroup, Point3d};
/// use surforient_algorithms::estimate_orientation;
///
/// fn main() -> surforient_core::Result<()> {
///     let group = NeighborGroup::from_positions(vec![
///         Point3d::new(0.0, 0.0, 0.0),
///         Point3d::new(1.0, 0.0, 0.0),
///         Point3d::new(0.0, 1.0, 0.0),
///         Point3d::new(1.0, 1.0, 0.0),
///     ])?;
///
///     let estimate = estimate_orientation(&group);
///     assert!(!estimate.is_degenerate());
///     assert!((estimate.normal.z - 1.0).abs() < 1e-9);
///     Ok(())
/// }
/// ```
pub fn estimate_orientation(group: &NeighborGroup) -> OrientationEstimate {
    if group.len() < MIN_PLANE_POINTS {
        return degenerate(group, DegenerateReason::TooFewPoints);
    }

    let normal = covariance_matrix(&group.positions()).and_then(|cov| plane_normal(&cov));

    match normal {
        Some(normal) => OrientationEstimate {
            normal: upward(normal),
            warning: None,
        },
        None => degenerate(group, DegenerateReason::NoPlane),
    }
}

/// Estimate the normal of every group, paired with the group's anchor position
///
/// Degenerate groups receive the default normal and never stop the batch.
pub fn estimate_orientations(groups: &[NeighborGroup]) -> Vec<Orientation> {
    let orientations: Vec<Orientation> = groups
        .iter()
        .map(|group| {
            let estimate = estimate_orientation(group);
            Orientation {
                position: group.anchor().position,
                normal: estimate.normal,
                degenerate: estimate.is_degenerate(),
            }
        })
        .collect();

    let degenerate = orientations.iter().filter(|o| o.degenerate).count();
    if degenerate > 0 {
        debug!(
            "{} of {} orientations fell back to the default normal",
            degenerate,
            orientations.len()
        );
    }

    orientations
}
