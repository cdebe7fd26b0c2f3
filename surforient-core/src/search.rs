//! Neighbor search strategy and criterion types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How neighbors of a point are selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// A fixed number of closest points
    Knn,
    /// Every point within a fixed distance
    Radius,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Knn => write!(f, "knn"),
            SearchStrategy::Radius => write!(f, "radius"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knn" => Ok(SearchStrategy::Knn),
            "radius" => Ok(SearchStrategy::Radius),
            other => Err(Error::InvalidStrategy(format!(
                "unknown strategy '{}', expected 'knn' or 'radius'",
                other
            ))),
        }
    }
}

/// Legacy numeric codes: 1 = KNN, 2 = RADIUS
impl TryFrom<u8> for SearchStrategy {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(SearchStrategy::Knn),
            2 => Ok(SearchStrategy::Radius),
            other => Err(Error::InvalidStrategy(format!(
                "unknown strategy code {}",
                other
            ))),
        }
    }
}

/// The value a search is parameterized with.
///
/// `Count` includes the anchor point itself: `Count(3)` yields the point plus
/// its two closest neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SearchCriterion {
    Count(usize),
    Radius(f64),
}

impl SearchCriterion {
    /// Count criterion for callers that count neighbors without the anchor
    pub fn neighbors_excluding_self(k: usize) -> Self {
        SearchCriterion::Count(k.saturating_add(1))
    }

    /// The strategy this criterion naturally pairs with
    pub fn natural_strategy(&self) -> SearchStrategy {
        match self {
            SearchCriterion::Count(_) => SearchStrategy::Knn,
            SearchCriterion::Radius(_) => SearchStrategy::Radius,
        }
    }

    /// Check the criterion against `strategy` and produce a ready-to-run query
    pub fn resolve(self, strategy: SearchStrategy) -> Result<NeighborQuery> {
        match (strategy, self) {
            (SearchStrategy::Knn, SearchCriterion::Count(0)) => Err(Error::InvalidCriterion(
                "neighbor count must be greater than 0".to_string(),
            )),
            (SearchStrategy::Knn, SearchCriterion::Count(k)) => Ok(NeighborQuery::Knn(k)),
            (SearchStrategy::Radius, SearchCriterion::Radius(r)) => {
                if !r.is_finite() {
                    Err(Error::InvalidCriterion(format!("radius must be finite, got {}", r)))
                } else if r <= 0.0 {
                    Err(Error::InvalidCriterion(format!("radius must be positive, got {}", r)))
                } else {
                    Ok(NeighborQuery::Radius(r))
                }
            }
            (SearchStrategy::Knn, SearchCriterion::Radius(r)) => Err(Error::InvalidCriterion(
                format!("knn search needs an integer neighbor count, got radius {}", r),
            )),
            (SearchStrategy::Radius, SearchCriterion::Count(k)) => Err(Error::InvalidCriterion(
                format!("radius search needs a real radius, got count {}", k),
            )),
        }
    }
}

/// A validated search request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeighborQuery {
    Knn(usize),
    Radius(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("knn".parse::<SearchStrategy>().unwrap(), SearchStrategy::Knn);
        assert_eq!(" RADIUS ".parse::<SearchStrategy>().unwrap(), SearchStrategy::Radius);
        assert!(matches!(
            "octree".parse::<SearchStrategy>(),
            Err(Error::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_from_code() {
        assert_eq!(SearchStrategy::try_from(1u8).unwrap(), SearchStrategy::Knn);
        assert_eq!(SearchStrategy::try_from(2u8).unwrap(), SearchStrategy::Radius);
        assert!(matches!(SearchStrategy::try_from(0u8), Err(Error::InvalidStrategy(_))));
        assert!(matches!(SearchStrategy::try_from(3u8), Err(Error::InvalidStrategy(_))));
    }

    #[test]
    fn test_resolve_valid() {
        assert_eq!(
            SearchCriterion::Count(4).resolve(SearchStrategy::Knn).unwrap(),
            NeighborQuery::Knn(4)
        );
        assert_eq!(
            SearchCriterion::Radius(200.0).resolve(SearchStrategy::Radius).unwrap(),
            NeighborQuery::Radius(200.0)
        );
    }

    #[test]
    fn test_resolve_rejects_non_positive() {
        assert!(matches!(
            SearchCriterion::Count(0).resolve(SearchStrategy::Knn),
            Err(Error::InvalidCriterion(_))
        ));
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SearchCriterion::Radius(r).resolve(SearchStrategy::Radius),
                Err(Error::InvalidCriterion(_))
            ));
        }
    }

    #[test]
    fn test_resolve_rejects_mismatched_type() {
        assert!(matches!(
            SearchCriterion::Radius(2.0).resolve(SearchStrategy::Knn),
            Err(Error::InvalidCriterion(_))
        ));
        assert!(matches!(
            SearchCriterion::Count(2).resolve(SearchStrategy::Radius),
            Err(Error::InvalidCriterion(_))
        ));
    }

    #[test]
    fn test_neighbors_excluding_self() {
        assert_eq!(SearchCriterion::neighbors_excluding_self(2), SearchCriterion::Count(3));
        assert_eq!(SearchCriterion::Radius(1.0).natural_strategy(), SearchStrategy::Radius);
    }
}
