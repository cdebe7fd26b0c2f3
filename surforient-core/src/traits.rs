//! Core traits for surforient

use crate::error::{Error, Result};
use crate::orientation::OrientationRecord;
use crate::point::Point3d;

/// Trait for nearest neighbor search functionality.
///
/// Results are `(index, distance)` pairs sorted by ascending distance, ties
/// broken by ascending index.
pub trait NearestNeighborSearch {
    /// Find the k nearest neighbors to a query point
    fn find_k_nearest(&self, query: &Point3d, k: usize) -> Vec<(usize, f64)>;

    /// Find all neighbors within a given radius (inclusive)
    fn find_radius_neighbors(&self, query: &Point3d, radius: f64) -> Vec<(usize, f64)>;
}

/// Destination for estimated orientations, typically a host model's
/// orientation table.
pub trait OrientationSink {
    /// Append one orientation. The default normal of a degenerate
    /// neighborhood is accepted like any other.
    fn add_orientation(&mut self, record: OrientationRecord) -> Result<()>;
}

impl OrientationSink for Vec<OrientationRecord> {
    fn add_orientation(&mut self, record: OrientationRecord) -> Result<()> {
        if !record.normal.iter().all(|c| c.is_finite()) {
            return Err(Error::Sink(format!(
                "non-finite normal at ({}, {}, {})",
                record.position.x, record.position.y, record.position.z
            )));
        }
        self.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;
    use crate::point::{Vector3d, DEFAULT_NORMAL};

    #[test]
    fn test_vec_sink_accepts_default_normal() {
        let mut sink: Vec<OrientationRecord> = Vec::new();
        let orientation = Orientation {
            position: Point3d::new(1.0, 2.0, 3.0),
            normal: DEFAULT_NORMAL,
            degenerate: true,
        };
        sink.add_orientation(OrientationRecord::new(orientation, "fault")).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].normal, DEFAULT_NORMAL);
        assert_eq!(sink[0].surface, "fault");
    }

    #[test]
    fn test_vec_sink_rejects_nan_normal() {
        let mut sink: Vec<OrientationRecord> = Vec::new();
        let orientation = Orientation {
            position: Point3d::origin(),
            normal: Vector3d::new(f64::NAN, 0.0, 1.0),
            degenerate: false,
        };
        let result = sink.add_orientation(OrientationRecord::new(orientation, "fault"));
        assert!(matches!(result, Err(Error::Sink(_))));
        assert!(sink.is_empty());
    }
}
