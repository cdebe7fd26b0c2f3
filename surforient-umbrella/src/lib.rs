//! # surforient
//!
//! Orientation constraints for implicit geological models, estimated from
//! surface points.
//!
//! This is the umbrella crate that re-exports the workspace crates:
//!
//! - **Core**: surface points, neighbor groups, search criteria, orientation
//!   records, errors and the `OrientationSink` trait
//! - **Algorithms**: per-surface neighbor search (KNN or radius) and
//!   covariance-based normal estimation
//!
//! ## Quick Start
//!
//! ```rust
//! use surforient::prelude::*;
//!
//! let points = vec![
//!     Point3d::new(0.0, 0.0, 0.0),
//!     Point3d::new(1.0, 0.0, 0.0),
//!     Point3d::new(0.0, 1.0, 0.0),
//!     Point3d::new(1.0, 1.0, 0.0),
//! ];
//!
//! let groups = search_neighbors(&points, SearchCriterion::Count(4), SearchStrategy::Knn).unwrap();
//! let orientations = estimate_orientations(&groups);
//! assert!(orientations.iter().all(|o| (o.normal.z - 1.0).abs() < 1e-9));
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables algorithms
//! - `algorithms`: Neighbor search and orientation estimation

// Re-export core functionality
pub use surforient_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use surforient_algorithms as algorithms;

/// Convenient imports for common use cases
pub mod prelude {
    pub use surforient_core::*;

    #[cfg(feature = "algorithms")]
    pub use surforient_algorithms::*;
}
