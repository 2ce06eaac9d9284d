//! Core data structures and transforms for stlform
//!
//! This crate owns the triangle-soup mesh buffer and the stateless engine that
//! mutates it: bounding box and centroid queries, rotation about an origin or
//! centroid pivot, and axis-referenced uniform or per-axis scaling. Nothing
//! here performs I/O or keeps state between calls.

pub mod axis;
pub mod bounds;
pub mod error;
pub mod mesh;
pub mod point;
pub mod scale;
pub mod traits;
pub mod transform;

pub use axis::*;
pub use bounds::*;
pub use error::*;
pub use mesh::*;
pub use point::*;
pub use scale::*;
pub use traits::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Rotation3, Vector3};
