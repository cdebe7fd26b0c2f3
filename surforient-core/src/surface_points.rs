//! Labelled surface point sets

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::ops::Index;

/// An ordered collection of surface points, possibly spanning several surfaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfacePointSet {
    pub points: Vec<SurfacePoint>,
}

impl SurfacePointSet {
    /// Create a new empty point set
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point set from a vector of points
    pub fn from_points(points: Vec<SurfacePoint>) -> Self {
        Self { points }
    }

    /// Get the number of points in the set
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the set
    pub fn push(&mut self, point: SurfacePoint) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, SurfacePoint> {
        self.points.iter()
    }

    /// Distinct surface labels in ascending order
    pub fn surfaces(&self) -> Vec<&str> {
        self.points
            .iter()
            .map(|p| p.surface.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Positions (within this set) of the points on `surface`, in input order
    pub fn surface_indices(&self, surface: &str) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.surface == surface)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check that every coordinate is finite and every id is unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.points.len());
        for point in &self.points {
            if !is_finite_point(&point.position) {
                return Err(Error::InvalidData(format!(
                    "point {} has non-finite coordinates",
                    point.id
                )));
            }
            if !seen.insert(point.id) {
                return Err(Error::InvalidData(format!(
                    "duplicate point id {}",
                    point.id
                )));
            }
        }
        Ok(())
    }
}

impl Index<usize> for SurfacePointSet {
    type Output = SurfacePoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IntoIterator for SurfacePointSet {
    type Item = SurfacePoint;
    type IntoIter = std::vec::IntoIter<SurfacePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a SurfacePointSet {
    type Item = &'a SurfacePoint;
    type IntoIter = std::slice::Iter<'a, SurfacePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Extend<SurfacePoint> for SurfacePointSet {
    fn extend<I: IntoIterator<Item = SurfacePoint>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<SurfacePoint> for SurfacePointSet {
    fn from_iter<I: IntoIterator<Item = SurfacePoint>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}
