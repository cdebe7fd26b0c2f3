//! Neighbor search over the points of one surface
//!
//! Every point receives a [`NeighborGroup`] whose first element is the point
//! itself. KNN groups hold exactly `min(k, n)` points; radius groups hold
//! every point within the radius, inclusive.

use crate::nearest_neighbor::{BruteForceSearch, RTreeSearch, SearchBackend};
use log::debug;
use surforient_core::{
    is_finite_point, Error, NearestNeighborSearch, Neighbor, NeighborGroup, NeighborQuery,
    Point3d, Result, SearchCriterion, SearchStrategy,
};

/// Find the neighbors of every point using the default spatial index
///
/// # Arguments
/// * `points` - Coordinates of the points of a single surface
/// * `criterion` - Neighbor count (KNN, anchor included) or radius (RADIUS)
/// * `strategy` - Which search to run
///
/// # Returns
/// * `Result<Vec<NeighborGroup>>` - Group `i` belongs to `points[i]`
///
/// # Example
/// ```rust
/// use surforient_core::{Point3d, SearchCriterion, SearchStrategy};
/// use surforient_algorithms::search_neighbors;
///
/// fn main() -> surforient_core::Result<()> {
///     let points = vec![
///         Point3d::new(0.0, 0.0, 0.0),
///         Point3d::new(1.0, 0.0, 0.0),
///         Point3d::new(5.0, 0.0, 0.0),
///     ];
///
///     let groups = search_neighbors(&points, SearchCriterion::Count(2), SearchStrategy::Knn)?;
///     assert_eq!(groups[0].indices(), vec![0, 1]);
///     assert_eq!(groups[2].indices(), vec![2, 1]);
///     Ok(())
/// }
/// ```
pub fn search_neighbors(
    points: &[Point3d],
    criterion: SearchCriterion,
    strategy: SearchStrategy,
) -> Result<Vec<NeighborGroup>> {
    search_neighbors_with(points, criterion, strategy, SearchBackend::default())
}

/// Same as [`search_neighbors`] with an explicit spatial index
pub fn search_neighbors_with(
    points: &[Point3d],
    criterion: SearchCriterion,
    strategy: SearchStrategy,
    backend: SearchBackend,
) -> Result<Vec<NeighborGroup>> {
    let query = criterion.resolve(strategy)?;

    if points.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(idx) = points.iter().position(|p| !is_finite_point(p)) {
        return Err(Error::InvalidData(format!(
            "point {} has non-finite coordinates",
            idx
        )));
    }

    let groups = match backend {
        SearchBackend::RTree => collect_groups(&RTreeSearch::new(points)?, points, query)?,
        SearchBackend::BruteForce => collect_groups(&BruteForceSearch::new(points), points, query)?,
    };

    debug!(
        "{} search over {} points ({:?}) produced {} neighbor entries",
        strategy,
        points.len(),
        backend,
        groups.iter().map(NeighborGroup::len).sum::<usize>()
    );

    Ok(groups)
}

fn collect_groups<S: NearestNeighborSearch>(
    index: &S,
    points: &[Point3d],
    query: NeighborQuery,
) -> Result<Vec<NeighborGroup>> {
    points
        .iter()
        .enumerate()
        .map(|(anchor, point)| {
            let found = match query {
                NeighborQuery::Knn(k) => index.find_k_nearest(point, k),
                NeighborQuery::Radius(radius) => index.find_radius_neighbors(point, radius),
            };
            build_group(anchor, points, found)
        })
        .collect()
}

/// Turn ranked `(index, distance)` pairs into a group led by the anchor.
///
/// Coincident points can rank ahead of the anchor, or push it out of a full
/// KNN result entirely; either way it ends up in front at distance 0 and the
/// group size is unchanged.
fn build_group(anchor: usize, points: &[Point3d], mut found: Vec<(usize, f64)>) -> Result<NeighborGroup> {
    match found.iter().position(|&(idx, _)| idx == anchor) {
        Some(0) => {}
        Some(pos) => {
            let entry = found.remove(pos);
            found.insert(0, entry);
        }
        None => {
            found.pop();
            found.insert(0, (anchor, 0.0));
        }
    }

    let neighbors = found
        .into_iter()
        .map(|(index, distance)| Neighbor {
            index,
            position: points[index],
            distance,
        })
        .collect();

    NeighborGroup::from_neighbors(neighbors)
}
