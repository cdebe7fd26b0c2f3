//! Core data structures and traits for surforient
//!
//! This crate provides the fundamental types for estimating geological surface
//! orientations from surface points: labelled points, neighbor groups,
//! search criteria, orientation records and the traits that connect the
//! algorithms to a host model.

pub mod point;
pub mod surface_points;
pub mod neighbor;
pub mod search;
pub mod orientation;
pub mod traits;
pub mod error;

pub use point::*;
pub use surface_points::*;
pub use neighbor::*;
pub use search::*;
pub use orientation::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Point3, Vector3};
