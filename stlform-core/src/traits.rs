//! Core traits for stlform

use crate::{axis::Axis, bounds, bounds::BoundingBox, mesh::TriangleSoup, point::Point3d};

/// Trait for geometry whose extent can be queried
pub trait Measurable {
    /// Get the axis-aligned bounding box of the object
    fn bounding_box(&self) -> BoundingBox;

    /// Get the vertex-mean center of the object
    fn centroid(&self) -> Point3d;

    /// Get the extent of the object along one axis
    fn axis_length(&self, axis: Axis) -> f64 {
        self.bounding_box().length(axis)
    }
}

impl Measurable for TriangleSoup {
    fn bounding_box(&self) -> BoundingBox {
        bounds::bounding_box(self)
    }

    fn centroid(&self) -> Point3d {
        bounds::centroid(self)
    }

    fn axis_length(&self, axis: Axis) -> f64 {
        bounds::axis_length(self, axis)
    }
}
