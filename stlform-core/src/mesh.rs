//! Mesh data structures
//!
//! [`TriangleSoup`] is the buffer every transform works on: each triangle owns
//! its three vertex copies and the triangle count never changes once built.
//! [`TriangleMesh`] is the indexed view handed to renderers.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle soup of shape N × 3 vertices × 3 coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleSoup {
    triangles: Vec<Triangle>,
}

impl TriangleSoup {
    /// Create an empty soup
    pub fn new() -> Self {
        Self { triangles: Vec::new() }
    }

    /// Create a soup from owned triangles
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Create a soup from a flat `x, y, z, x, y, z, ...` coordinate buffer
    ///
    /// The buffer length must be a multiple of 9 (three vertices of three
    /// coordinates per triangle).
    pub fn from_flat(coords: &[f64]) -> Result<Self> {
        if coords.len() % 9 != 0 {
            return Err(Error::invalid_data(format!(
                "flat buffer of {} coordinates is not a whole number of triangles",
                coords.len()
            )));
        }

        let triangles = coords
            .chunks_exact(9)
            .map(|c| {
                [
                    Point3d::new(c[0], c[1], c[2]),
                    Point3d::new(c[3], c[4], c[5]),
                    Point3d::new(c[6], c[7], c[8]),
                ]
            })
            .collect();
        Ok(Self { triangles })
    }

    /// Axis-aligned cube spanning `[0, size]` on every axis, 12 outward-wound triangles
    pub fn cube(size: f64) -> Self {
        let p = |x: f64, y: f64, z: f64| Point3d::new(x * size, y * size, z * size);
        let quads = [
            // -Z
            [p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 0.0, 0.0)],
            // +Z
            [p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(1.0, 1.0, 1.0), p(0.0, 1.0, 1.0)],
            // -Y
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(0.0, 0.0, 1.0)],
            // +Y
            [p(0.0, 1.0, 0.0), p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 0.0)],
            // -X
            [p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 1.0), p(0.0, 1.0, 0.0)],
            // +X
            [p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 1.0, 1.0), p(1.0, 0.0, 1.0)],
        ];

        let triangles = quads
            .iter()
            .flat_map(|[a, b, c, d]| [[*a, *b, *c], [*a, *c, *d]])
            .collect();
        Self { triangles }
    }

    /// Unit cube spanning `[0, 1]³`
    pub fn unit_cube() -> Self {
        Self::cube(1.0)
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of vertices (always three per triangle)
    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Check if the soup has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Borrow the triangles
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterate over every vertex in triangle order
    pub fn vertices(&self) -> impl Iterator<Item = &Point3d> + '_ {
        self.triangles.iter().flatten()
    }

    /// Mutably iterate over every vertex in triangle order
    ///
    /// Only vertex values can be changed through this; the triangle count and
    /// order are fixed.
    pub fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Point3d> + '_ {
        self.triangles.iter_mut().flatten()
    }

    /// View the soup as a flat coordinate buffer of length `9 * N`
    pub fn as_flat(&self) -> &[f64] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Face normal of each triangle, zero for degenerate triangles
    pub fn face_normals(&self) -> Vec<Vector3d> {
        self.triangles
            .iter()
            .map(|[v0, v1, v2]| {
                let normal = (v1 - v0).cross(&(v2 - v0));
                normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3d::zeros)
            })
            .collect()
    }

    /// Build the indexed view with sequential faces `[0,1,2], [3,4,5], ...`
    pub fn to_indexed(&self) -> TriangleMesh {
        TriangleMesh::from(self)
    }

    /// Consume the soup, returning its triangles
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }
}

impl FromIterator<Triangle> for TriangleSoup {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self::from_triangles(iter.into_iter().collect())
    }
}

/// A triangle mesh with a vertex list and index triples
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }
}

impl From<&TriangleSoup> for TriangleMesh {
    fn from(soup: &TriangleSoup) -> Self {
        let vertices = soup.vertices().copied().collect();
        let faces = (0..soup.triangle_count())
            .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
            .collect();
        Self { vertices, faces }
    }
}
