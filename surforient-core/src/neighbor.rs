//! Neighbor groups produced by the neighbor search

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One member of a neighbor group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Index of the point in the searched sequence, or its external id after remapping
    pub index: usize,
    pub position: Point3d,
    /// Euclidean distance to the anchor point
    pub distance: f64,
}

/// The neighborhood of one anchor point.
///
/// The first element is always the anchor itself at distance 0. Groups built by
/// the neighbor search list the remaining points by ascending distance, ties by
/// ascending index. Coordinates travel with the group, so estimating an
/// orientation never needs to look anything up in the original point table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborGroup {
    neighbors: Vec<Neighbor>,
}

impl NeighborGroup {
    /// Build a group from neighbors whose first element is the anchor
    pub fn from_neighbors(neighbors: Vec<Neighbor>) -> Result<Self> {
        match neighbors.first() {
            None => Err(Error::InvalidData(
                "a neighbor group needs at least the anchor point".to_string(),
            )),
            Some(anchor) if anchor.distance != 0.0 => Err(Error::InvalidData(format!(
                "anchor {} must be at distance 0, got {}",
                anchor.index, anchor.distance
            ))),
            Some(_) => Ok(Self { neighbors }),
        }
    }

    /// Build a group from raw coordinates; the first position is the anchor.
    ///
    /// Indices are assigned 0..n in the given order and distances are measured
    /// from the anchor. The order of the remaining positions is kept as given.
    pub fn from_positions(positions: Vec<Point3d>) -> Result<Self> {
        let anchor = *positions.first().ok_or_else(|| {
            Error::InvalidData("a neighbor group needs at least the anchor point".to_string())
        })?;

        let neighbors = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| Neighbor {
                index,
                position,
                distance: distance_squared(&anchor, &position).sqrt(),
            })
            .collect();

        Ok(Self { neighbors })
    }

    /// The point this neighborhood belongs to
    pub fn anchor(&self) -> &Neighbor {
        &self.neighbors[0]
    }

    /// Number of points in the group, anchor included
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Always false: a group holds at least its anchor
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.neighbors.iter()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.neighbors.iter().map(|n| n.index).collect()
    }

    pub fn positions(&self) -> Vec<Point3d> {
        self.neighbors.iter().map(|n| n.position).collect()
    }

    /// Replace every index `i` with `ids[i]`
    pub fn remap_indices(mut self, ids: &[usize]) -> Result<Self> {
        for neighbor in &mut self.neighbors {
            neighbor.index = *ids.get(neighbor.index).ok_or_else(|| {
                Error::InvalidData(format!(
                    "neighbor index {} out of range for {} ids",
                    neighbor.index,
                    ids.len()
                ))
            })?;
        }
        Ok(self)
    }
}

impl Index<usize> for NeighborGroup {
    type Output = Neighbor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.neighbors[index]
    }
}

impl<'a> IntoIterator for &'a NeighborGroup {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}
