//! Orientations from labelled surface points
//!
//! Points are grouped by surface label, neighbors are searched within each
//! surface only, and one orientation per point is handed to an
//! [`OrientationSink`].

use crate::nearest_neighbor::SearchBackend;
use crate::neighbors::search_neighbors_with;
use crate::normals::estimate_orientation;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use surforient_core::{
    NeighborGroup, OrientationRecord, OrientationSink, Point3d, Result, SearchCriterion,
    SearchStrategy, SurfacePointSet,
};

/// Configuration for [`orientations_from_surface_points`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationConfig {
    /// Neighbor count (anchor included) or search radius
    pub criterion: SearchCriterion,
    pub strategy: SearchStrategy,
    pub backend: SearchBackend,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            criterion: SearchCriterion::Count(3),
            strategy: SearchStrategy::Knn,
            backend: SearchBackend::RTree,
        }
    }
}

impl OrientationConfig {
    /// KNN search over `k` points, anchor included
    pub fn knn(k: usize) -> Self {
        Self {
            criterion: SearchCriterion::Count(k),
            strategy: SearchStrategy::Knn,
            ..Self::default()
        }
    }

    /// Radius search
    pub fn radius(radius: f64) -> Self {
        Self {
            criterion: SearchCriterion::Radius(radius),
            strategy: SearchStrategy::Radius,
            ..Self::default()
        }
    }

    pub fn with_backend(mut self, backend: SearchBackend) -> Self {
        self.backend = backend;
        self
    }
}

/// A neighbor group tagged with its surface; indices are external point ids
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceNeighborGroup {
    pub surface: String,
    pub group: NeighborGroup,
}

/// Counts reported by [`orientations_from_surface_points`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationSummary {
    /// Records handed to the sink
    pub records: usize,
    /// Records that carry the default normal
    pub degenerate: usize,
}

/// Find neighbors of every point among the points of its own surface
///
/// Surfaces are visited in ascending label order and points keep their input
/// order within a surface. Group indices are the points' `id`s.
pub fn search_surface_neighbors(
    set: &SurfacePointSet,
    criterion: SearchCriterion,
    strategy: SearchStrategy,
) -> Result<Vec<SurfaceNeighborGroup>> {
    search_surface_neighbors_with(set, criterion, strategy, SearchBackend::default())
}

/// Same as [`search_surface_neighbors`] with an explicit spatial index
pub fn search_surface_neighbors_with(
    set: &SurfacePointSet,
    criterion: SearchCriterion,
    strategy: SearchStrategy,
    backend: SearchBackend,
) -> Result<Vec<SurfaceNeighborGroup>> {
    criterion.resolve(strategy)?;
    set.validate()?;

    let mut result = Vec::with_capacity(set.len());

    for surface in set.surfaces() {
        let members = set.surface_indices(surface);
        let positions: Vec<Point3d> = members.iter().map(|&i| set[i].position).collect();
        let ids: Vec<usize> = members.iter().map(|&i| set[i].id).collect();

        debug!("searching neighbors of {} points on surface '{}'", positions.len(), surface);

        for group in search_neighbors_with(&positions, criterion, strategy, backend)? {
            result.push(SurfaceNeighborGroup {
                surface: surface.to_string(),
                group: group.remap_indices(&ids)?,
            });
        }
    }

    Ok(result)
}

/// Estimate one orientation per surface point and append it to `sink`
///
/// Degenerate neighborhoods are written with the default normal and counted in
/// the summary. Search errors and sink errors are returned immediately.
///
/// # Example
/// ```rust
/// use surforient_core::{OrientationRecord, Point3d, SurfacePoint, SurfacePointSet};
/// use surforient_algorithms::{orientations_from_surface_points, OrientationConfig};
///
/// fn main() -> surforient_core::Result<()> {
///     let set = SurfacePointSet::from_points(vec![
///         SurfacePoint::new(0, Point3d::new(0.0, 0.0, 10.0), "rock1"),
///         SurfacePoint::new(1, Point3d::new(1.0, 0.0, 10.0), "rock1"),
///         SurfacePoint::new(2, Point3d::new(0.0, 1.0, 10.0), "rock1"),
///     ]);
///
///     let mut records: Vec<OrientationRecord> = Vec::new();
///     let summary = orientations_from_surface_points(&set, &OrientationConfig::knn(3), &mut records)?;
///     assert_eq!(summary.records, 3);
///     assert_eq!(summary.degenerate, 0);
///     Ok(())
/// }
/// ```
pub fn orientations_from_surface_points<S>(
    set: &SurfacePointSet,
    config: &OrientationConfig,
    sink: &mut S,
) -> Result<OrientationSummary>
where
    S: OrientationSink + ?Sized,
{
    let groups = search_surface_neighbors_with(set, config.criterion, config.strategy, config.backend)?;

    let mut summary = OrientationSummary::default();
    for SurfaceNeighborGroup { surface, group } in groups {
        let estimate = estimate_orientation(&group);
        if estimate.is_degenerate() {
            summary.degenerate += 1;
        }

        sink.add_orientation(OrientationRecord {
            position: group.anchor().position,
            normal: estimate.normal,
            surface,
            degenerate: estimate.is_degenerate(),
        })?;
        summary.records += 1;
    }

    info!(
        "added {} orientations ({} with default normal) using {} search",
        summary.records, summary.degenerate, config.strategy
    );

    Ok(summary)
}

/// Collect the orientations of every surface point into a vector
pub fn estimate_surface_orientations(
    set: &SurfacePointSet,
    config: &OrientationConfig,
) -> Result<Vec<OrientationRecord>> {
    let mut records = Vec::with_capacity(set.len());
    orientations_from_surface_points(set, config, &mut records)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surforient_core::{Error, SurfacePoint, DEFAULT_NORMAL};

    /// Two parallel horizontal surfaces one unit apart, interleaved in input order
    fn layered_set() -> SurfacePointSet {
        let mut set = SurfacePointSet::new();
        let mut id = 100;
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            set.push(SurfacePoint::new(id, Point3d::new(x, y, 1.0), "rock2"));
            set.push(SurfacePoint::new(id + 1, Point3d::new(x, y, 0.0), "rock1"));
            id += 2;
        }
        set
    }

    #[test]
    fn test_neighbors_stay_on_their_surface() {
        let set = layered_set();
        // the other surface is closer than the far corner of the own one
        let groups = search_surface_neighbors(&set, SearchCriterion::Count(4), SearchStrategy::Knn).unwrap();

        assert_eq!(groups.len(), set.len());
        for SurfaceNeighborGroup { surface, group } in &groups {
            for id in group.indices() {
                let point = set.iter().find(|p| p.id == id).unwrap();
                assert_eq!(&point.surface, surface);
            }
        }
    }

    #[test]
    fn test_groups_are_ordered_by_surface_then_input() {
        let set = layered_set();
        let groups = search_surface_neighbors(&set, SearchCriterion::Count(2), SearchStrategy::Knn).unwrap();

        let anchors: Vec<(String, usize)> = groups
            .iter()
            .map(|g| (g.surface.clone(), g.group.anchor().index))
            .collect();
        assert_eq!(
            anchors,
            vec![
                ("rock1".to_string(), 101),
                ("rock1".to_string(), 103),
                ("rock1".to_string(), 105),
                ("rock1".to_string(), 107),
                ("rock2".to_string(), 100),
                ("rock2".to_string(), 102),
                ("rock2".to_string(), 104),
                ("rock2".to_string(), 106),
            ]
        );
        assert_eq!(groups[0].group.indices(), vec![101, 103]);
    }

    #[test]
    fn test_legacy_pairs_of_fault_points() {
        // three pairs of fault points, far apart from each other
        let set: SurfacePointSet = [
            (16, 0.0),
            (17, 10.0),
            (18, 500.0),
            (19, 510.0),
            (20, 1000.0),
            (21, 1010.0),
        ]
        .into_iter()
        .map(|(id, y)| SurfacePoint::new(id, Point3d::new(500.0, y, 500.0), "fault"))
        .collect();

        let sorted = |groups: Vec<SurfaceNeighborGroup>| -> Vec<Vec<usize>> {
            groups
                .into_iter()
                .map(|g| {
                    let mut ids = g.group.indices();
                    ids.sort_unstable();
                    ids
                })
                .collect()
        };

        let expected = vec![
            vec![16, 17],
            vec![16, 17],
            vec![18, 19],
            vec![18, 19],
            vec![20, 21],
            vec![20, 21],
        ];

        let knn = search_surface_neighbors(
            &set,
            SearchCriterion::neighbors_excluding_self(1),
            SearchStrategy::Knn,
        )
        .unwrap();
        let radius =
            search_surface_neighbors(&set, SearchCriterion::Radius(200.0), SearchStrategy::Radius).unwrap();

        assert_eq!(sorted(knn), expected);
        assert_eq!(sorted(radius), expected);
    }

    #[test]
    fn test_orientations_for_every_point() {
        let set = layered_set();
        let mut records: Vec<OrientationRecord> = Vec::new();
        let summary = orientations_from_surface_points(&set, &OrientationConfig::knn(3), &mut records).unwrap();

        assert_eq!(summary, OrientationSummary { records: 8, degenerate: 0 });
        assert_eq!(records.len(), 8);
        for record in &records {
            assert!((record.normal - DEFAULT_NORMAL).norm() < 1e-9);
            assert!(!record.degenerate);
        }
        assert_eq!(records[0].surface, "rock1");
        assert_eq!(records[0].position, Point3d::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_small_surfaces_get_default_normal() {
        let mut set = layered_set();
        set.push(SurfacePoint::new(1, Point3d::new(3.0, 3.0, 3.0), "dyke"));
        set.push(SurfacePoint::new(2, Point3d::new(3.0, 4.0, 2.0), "dyke"));

        let records = estimate_surface_orientations(&set, &OrientationConfig::knn(5)).unwrap();
        let dyke: Vec<&OrientationRecord> = records.iter().filter(|r| r.surface == "dyke").collect();

        assert_eq!(records.len(), 10);
        assert_eq!(dyke.len(), 2);
        for record in dyke {
            assert!(record.degenerate);
            assert_eq!(record.normal, DEFAULT_NORMAL);
        }
    }

    #[test]
    fn test_sink_errors_propagate() {
        struct RejectingSink;

        impl OrientationSink for RejectingSink {
            fn add_orientation(&mut self, _record: OrientationRecord) -> Result<()> {
                Err(Error::Sink("orientation table is read-only".to_string()))
            }
        }

        let result = orientations_from_surface_points(&layered_set(), &OrientationConfig::default(), &mut RejectingSink);
        assert!(matches!(result, Err(Error::Sink(_))));
    }

    #[test]
    fn test_invalid_inputs() {
        let set = layered_set();
        let result = search_surface_neighbors(&set, SearchCriterion::Radius(1.0), SearchStrategy::Knn);
        assert!(matches!(result, Err(Error::InvalidCriterion(_))));

        let mut duplicated = layered_set();
        duplicated.push(SurfacePoint::new(100, Point3d::new(9.0, 9.0, 9.0), "rock1"));
        let result = search_surface_neighbors(&duplicated, SearchCriterion::Count(3), SearchStrategy::Knn);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_config_constructors() {
        let config = OrientationConfig::radius(150.0).with_backend(SearchBackend::BruteForce);
        assert_eq!(config.criterion, SearchCriterion::Radius(150.0));
        assert_eq!(config.strategy, SearchStrategy::Radius);
        assert_eq!(config.backend, SearchBackend::BruteForce);

        assert_eq!(OrientationConfig::default(), OrientationConfig::knn(3));
    }
}
