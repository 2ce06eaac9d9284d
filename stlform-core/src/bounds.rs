//! Bounding box, axis length and centroid queries
//!
//! All three are recomputed from the current vertex positions on every call;
//! nothing is cached on the mesh.

use crate::axis::Axis;
use crate::mesh::TriangleSoup;
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    /// Degenerate box at the origin, reported for empty meshes
    pub fn empty() -> Self {
        Self {
            min: Point3d::origin(),
            max: Point3d::origin(),
        }
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3d {
        self.max - self.min
    }

    /// Extent along one axis
    pub fn length(&self, axis: Axis) -> f64 {
        let i = axis.index();
        self.max[i] - self.min[i]
    }

    /// Midpoint of the box
    pub fn center(&self) -> Point3d {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Component-wise minimum and maximum over every vertex
pub fn bounding_box(mesh: &TriangleSoup) -> BoundingBox {
    let mut vertices = mesh.vertices();
    let Some(first) = vertices.next() else {
        return BoundingBox::empty();
    };

    let mut min = *first;
    let mut max = *first;
    for vertex in vertices {
        min.x = min.x.min(vertex.x);
        min.y = min.y.min(vertex.y);
        min.z = min.z.min(vertex.z);

        max.x = max.x.max(vertex.x);
        max.y = max.y.max(vertex.y);
        max.z = max.z.max(vertex.z);
    }

    BoundingBox { min, max }
}

/// `max[axis] - min[axis]`, zero for an empty mesh
pub fn axis_length(mesh: &TriangleSoup, axis: Axis) -> f64 {
    bounding_box(mesh).length(axis)
}

/// Mean of all `3 * N` vertex positions, the origin for an empty mesh
///
/// Shared corners count once per triangle that owns a copy, so this is a
/// vertex-weighted mean rather than a volume or area centroid.
pub fn centroid(mesh: &TriangleSoup) -> Point3d {
    if mesh.is_empty() {
        return Point3d::origin();
    }

    let sum = mesh
        .vertices()
        .fold(Vector3d::zeros(), |acc, v| acc + v.coords);
    Point3d::from(sum / mesh.vertex_count() as f64)
}
