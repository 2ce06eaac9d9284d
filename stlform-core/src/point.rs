//! Point and vector aliases used by the mesh buffer

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// One triangle of a soup: three owned vertex positions
pub type Triangle = [Point3d; 3];
