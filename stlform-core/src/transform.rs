//! Rigid transforms on a triangle soup
//!
//! Angles cross this interface in degrees and become radians only when a
//! rotation matrix is built. Combined rotations are applied as three separate
//! passes in the fixed order X, then Y, then Z.

use crate::axis::Axis;
use crate::bounds;
use crate::error::{Error, Result};
use crate::mesh::TriangleSoup;
use crate::point::*;
use log::debug;
use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Point held fixed while rotating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pivot {
    /// World origin `(0, 0, 0)`
    #[default]
    Origin,
    /// Vertex-mean centroid of the mesh, measured just before rotating
    Centroid,
}

impl Pivot {
    /// Resolve the pivot against the mesh's current vertex positions
    pub fn resolve(self, mesh: &TriangleSoup) -> Point3d {
        match self {
            Pivot::Origin => Point3d::origin(),
            Pivot::Centroid => bounds::centroid(mesh),
        }
    }
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pivot::Origin => f.write_str("origin"),
            Pivot::Centroid => f.write_str("centroid"),
        }
    }
}

/// Rotation angles about X, Y and Z, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerDegrees {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl EulerDegrees {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Angle about a single axis
    pub fn about(axis: Axis, degrees: f64) -> Self {
        let mut angles = Self::default();
        angles.set(axis, degrees);
        angles
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, degrees: f64) {
        match axis {
            Axis::X => self.x = degrees,
            Axis::Y => self.y = degrees,
            Axis::Z => self.z = degrees,
        }
    }

    /// True when every angle is exactly zero
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// True when no angle is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Reject NaN or infinite angles
    pub fn check_finite(&self) -> Result<()> {
        if self.is_finite() {
            return Ok(());
        }
        Err(Error::invalid_argument(format!(
            "rotation angles must be finite, got ({}, {}, {})°",
            self.x, self.y, self.z
        )))
    }
}

/// Reject a shift with NaN or infinite components
pub fn check_finite_shift(shift: &Vector3d) -> Result<()> {
    if shift.iter().all(|c| c.is_finite()) {
        return Ok(());
    }
    Err(Error::invalid_argument(format!(
        "shift must be finite, got ({}, {}, {}) mm",
        shift.x, shift.y, shift.z
    )))
}

impl Add for EulerDegrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for EulerDegrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// An incremental rigid change: rotate first, then shift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidDelta {
    #[serde(default)]
    pub rotation: EulerDegrees,
    #[serde(default = "Vector3d::zeros")]
    pub shift: Vector3d,
}

impl RigidDelta {
    pub fn new(rotation: EulerDegrees, shift: Vector3d) -> Self {
        Self { rotation, shift }
    }

    /// True when both the rotation and the shift are exactly zero
    pub fn is_identity(&self) -> bool {
        self.rotation.is_zero() && self.shift == Vector3d::zeros()
    }

    /// Reject NaN or infinite angles and shift components
    pub fn check_finite(&self) -> Result<()> {
        self.rotation.check_finite()?;
        check_finite_shift(&self.shift)
    }
}

impl Default for RigidDelta {
    fn default() -> Self {
        Self::new(EulerDegrees::default(), Vector3d::zeros())
    }
}

/// Right-handed rotation about one axis
pub fn rotation_matrix(axis: Axis, degrees: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&axis.unit(), degrees.to_radians())
}

/// One full pass over the vertices: shift by `-pivot`, rotate, shift back
fn rotate_pass(mesh: &mut TriangleSoup, rotation: &Rotation3<f64>, pivot: &Point3d) {
    for vertex in mesh.vertices_mut() {
        *vertex = pivot + rotation * (*vertex - pivot);
    }
}

/// Rotate about a single axis through the pivot
///
/// A zero angle leaves the mesh untouched. A NaN or infinite angle is an
/// `InvalidArgument` error and also leaves it untouched.
pub fn rotate(mesh: &mut TriangleSoup, axis: Axis, degrees: f64, pivot: Pivot) -> Result<()> {
    EulerDegrees::about(axis, degrees).check_finite()?;
    if degrees == 0.0 || mesh.is_empty() {
        return Ok(());
    }

    let center = pivot.resolve(mesh);
    debug!(
        "rotating {} triangles {degrees}° about {axis} through {pivot} {center:?}",
        mesh.triangle_count()
    );
    rotate_pass(mesh, &rotation_matrix(axis, degrees), &center);
    Ok(())
}

/// Rotate about X, then Y, then Z, all through the same pivot
///
/// The pivot is resolved once, before the X pass. Each non-zero angle is its
/// own pass over the vertices; the three matrices are never pre-multiplied.
pub fn rotate_xyz(mesh: &mut TriangleSoup, angles: EulerDegrees, pivot: Pivot) -> Result<()> {
    angles.check_finite()?;
    if angles.is_zero() || mesh.is_empty() {
        return Ok(());
    }

    let center = pivot.resolve(mesh);
    debug!(
        "rotating {} triangles by ({}, {}, {})° through {pivot} {center:?}",
        mesh.triangle_count(),
        angles.x,
        angles.y,
        angles.z
    );

    for axis in Axis::ALL {
        let degrees = angles.get(axis);
        if degrees != 0.0 {
            rotate_pass(mesh, &rotation_matrix(axis, degrees), &center);
        }
    }
    Ok(())
}

/// Add `shift` to every vertex
pub fn translate(mesh: &mut TriangleSoup, shift: Vector3d) -> Result<()> {
    check_finite_shift(&shift)?;
    for vertex in mesh.vertices_mut() {
        *vertex += shift;
    }
    Ok(())
}

/// Rotate with [`rotate_xyz`], then translate by the shift
///
/// The shift does not depend on the pivot and is always applied. The whole
/// delta is checked before any vertex moves, so a non-finite angle or shift
/// component leaves the mesh untouched.
pub fn apply_rigid(mesh: &mut TriangleSoup, delta: &RigidDelta, pivot: Pivot) -> Result<()> {
    delta.check_finite()?;
    rotate_xyz(mesh, delta.rotation, pivot)?;
    debug!("shifting {} triangles by {:?}", mesh.triangle_count(), delta.shift);
    translate(mesh, delta.shift)
}
