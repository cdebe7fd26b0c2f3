//! Nearest neighbor search implementations

use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use surforient_core::{distance_squared, is_finite_point, Error, NearestNeighborSearch, Point3d, Result};

/// Spatial index used to answer neighbor queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchBackend {
    /// R*-tree, the default for anything but tiny inputs
    #[default]
    RTree,
    /// Linear scan over every point
    BruteForce,
}

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// R*-tree backed nearest neighbor search
pub struct RTreeSearch {
    tree: RTree<IndexedPoint>,
    points: Vec<Point3d>,
}

impl RTreeSearch {
    pub fn new(points: &[Point3d]) -> Result<Self> {
        if let Some(idx) = points.iter().position(|p| !is_finite_point(p)) {
            return Err(Error::InvalidData(format!(
                "point {} has non-finite coordinates",
                idx
            )));
        }

        let entries = points
            .iter()
            .enumerate()
            .map(|(idx, p)| GeomWithData::new([p.x, p.y, p.z], idx))
            .collect();

        Ok(Self {
            tree: RTree::bulk_load(entries),
            points: points.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Re-measure candidates with the shared distance formula and rank them
    fn rank(&self, query: &Point3d, candidates: impl Iterator<Item = usize>) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = candidates
            .map(|idx| (idx, distance_squared(&self.points[idx], query)))
            .collect();
        sort_by_distance(&mut ranked);
        ranked
    }
}

impl NearestNeighborSearch for RTreeSearch {
    fn find_k_nearest(&self, query: &Point3d, k: usize) -> Vec<(usize, f64)> {
        if k == 0 || self.points.is_empty() {
            return Vec::new();
        }

        // Keep pulling past the k-th candidate while distances tie with it,
        // so the index tie-break below sees every contender.
        let mut candidates = Vec::with_capacity(k);
        let mut cutoff = None;
        for (entry, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&[query.x, query.y, query.z]) {
            if matches!(cutoff, Some(limit) if d2 > limit) {
                break;
            }
            candidates.push(entry.data);
            if cutoff.is_none() && candidates.len() == k {
                cutoff = Some(d2);
            }
        }

        let mut ranked = self.rank(query, candidates.into_iter());
        ranked.truncate(k);
        into_distances(ranked)
    }

    fn find_radius_neighbors(&self, query: &Point3d, radius: f64) -> Vec<(usize, f64)> {
        if radius < 0.0 || self.points.is_empty() {
            return Vec::new();
        }

        let radius_squared = radius * radius;
        // Slightly widened tree query, exact inclusive test afterwards
        let widened = radius_squared * (1.0 + 1e-9);
        let candidates = self
            .tree
            .locate_within_distance([query.x, query.y, query.z], widened)
            .map(|entry| entry.data);

        let mut ranked = self.rank(query, candidates);
        ranked.retain(|&(_, d2)| d2 <= radius_squared);
        into_distances(ranked)
    }
}

/// Simple brute force nearest neighbor search for small datasets
pub struct BruteForceSearch {
    points: Vec<Point3d>,
}

impl BruteForceSearch {
    pub fn new(points: &[Point3d]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    fn all_distances(&self, query: &Point3d) -> Vec<(usize, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx, distance_squared(point, query)))
            .collect()
    }
}

impl NearestNeighborSearch for BruteForceSearch {
    fn find_k_nearest(&self, query: &Point3d, k: usize) -> Vec<(usize, f64)> {
        let mut distances = self.all_distances(query);
        sort_by_distance(&mut distances);
        distances.truncate(k);
        into_distances(distances)
    }

    fn find_radius_neighbors(&self, query: &Point3d, radius: f64) -> Vec<(usize, f64)> {
        if radius < 0.0 {
            return Vec::new();
        }

        let radius_squared = radius * radius;
        let mut distances = self.all_distances(query);
        distances.retain(|&(_, d2)| d2 <= radius_squared);
        sort_by_distance(&mut distances);
        into_distances(distances)
    }
}

/// Ascending squared distance, ties by ascending index
fn sort_by_distance(candidates: &mut [(usize, f64)]) {
    candidates.sort_by(|a, b| match a.1.total_cmp(&b.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
}

fn into_distances(squared: Vec<(usize, f64)>) -> Vec<(usize, f64)> {
    squared.into_iter().map(|(idx, d2)| (idx, d2.sqrt())).collect()
}
