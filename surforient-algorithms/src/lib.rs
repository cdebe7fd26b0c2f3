//! # surforient algorithms
//!
//! Neighbor search and orientation estimation for geological surface points.
//!
//! The typical flow groups points by surface, finds the neighbors of every
//! point on its own surface ([`search_neighbors`]), estimates a normal for each
//! neighborhood ([`estimate_orientation`]) and hands the results to a host
//! model through an [`OrientationSink`](surforient_core::OrientationSink)
//! ([`orientations_from_surface_points`]).

pub mod nearest_neighbor;
pub mod neighbors;
pub mod normals;
pub mod surface;

// Re-export commonly used items
pub use nearest_neighbor::*;
pub use neighbors::*;
pub use normals::*;
pub use surface::*;
