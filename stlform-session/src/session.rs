//! Absolute-target transform sessions
//!
//! A front end shows absolute controls ("X rotation: 37°", "shift Y: 5 mm")
//! while the engine only takes deltas. [`TransformSession`] remembers the last
//! absolute values it applied and turns each new target into
//! `new_absolute - last_absolute` before calling the engine.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use stlform_core::{
    apply_rigid, scale_axis_absolute, scale_uniform, Axis, EulerDegrees, Pivot, Result,
    RigidDelta, ScaleOutcome, TriangleSoup, Vector3d,
};
use stlform_io::{decode_stl, encode_stl, StlWriteOptions};
use stlform_view::{bounds_text, render_mesh, Figure, Readout, RenderOptions};

/// Absolute rotation and shift as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseTarget {
    #[serde(default)]
    pub rotation: EulerDegrees,
    #[serde(default = "Vector3d::zeros")]
    pub shift: Vector3d,
}

impl Default for PoseTarget {
    fn default() -> Self {
        Self {
            rotation: EulerDegrees::default(),
            shift: Vector3d::zeros(),
        }
    }
}

impl PoseTarget {
    pub fn new(rotation: EulerDegrees, shift: Vector3d) -> Self {
        Self { rotation, shift }
    }

    /// Delta that moves a mesh posed at `self` to `target`
    pub fn delta_to(&self, target: &PoseTarget) -> RigidDelta {
        RigidDelta::new(target.rotation - self.rotation, target.shift - self.shift)
    }

    /// Reject NaN or infinite angles and shift components
    pub fn check_finite(&self) -> Result<()> {
        RigidDelta::new(self.rotation, self.shift).check_finite()
    }
}

/// One uploaded mesh and the absolute values last applied to it
#[derive(Debug, Clone)]
pub struct TransformSession {
    original: TriangleSoup,
    mesh: TriangleSoup,
    pivot: Pivot,
    applied: PoseTarget,
}

impl TransformSession {
    /// Start a session on a decoded mesh
    pub fn new(mesh: TriangleSoup) -> Self {
        Self {
            original: mesh.clone(),
            mesh,
            pivot: Pivot::default(),
            applied: PoseTarget::default(),
        }
    }

    /// Start a session from uploaded STL bytes
    pub fn from_stl_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(decode_stl(data)?))
    }

    /// Replace the mesh with a new upload, forgetting all bookkeeping
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mesh = decode_stl(data)?;
        self.replace_mesh(mesh);
        Ok(())
    }

    /// Replace the mesh, forgetting all bookkeeping
    pub fn replace_mesh(&mut self, mesh: TriangleSoup) {
        info!("session loaded mesh with {} triangles", mesh.triangle_count());
        self.original = mesh.clone();
        self.mesh = mesh;
        self.applied = PoseTarget::default();
    }

    /// Restore the mesh as it was loaded and zero the bookkeeping
    pub fn reset(&mut self) {
        debug!("session reset to the uploaded mesh");
        self.mesh = self.original.clone();
        self.applied = PoseTarget::default();
    }

    /// Current working mesh
    pub fn mesh(&self) -> &TriangleSoup {
        &self.mesh
    }

    /// Mesh as it was loaded
    pub fn original(&self) -> &TriangleSoup {
        &self.original
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    /// Choose the pivot used by subsequent rotations
    pub fn set_pivot(&mut self, pivot: Pivot) {
        self.pivot = pivot;
    }

    /// Last absolute rotation and shift applied
    pub fn applied(&self) -> PoseTarget {
        self.applied
    }

    /// Move the mesh to an absolute pose target
    ///
    /// Returns the delta handed to the engine, or `None` when every delta
    /// component is exactly zero and the engine was not called. A target with
    /// a NaN or infinite component is rejected before the mesh or the
    /// recorded pose changes.
    pub fn apply_target(&mut self, target: PoseTarget) -> Result<Option<RigidDelta>> {
        target.check_finite()?;
        let delta = self.applied.delta_to(&target);
        if delta.is_identity() {
            debug!("pose target unchanged, skipping transform");
            return Ok(None);
        }

        apply_rigid(&mut self.mesh, &delta, self.pivot)?;
        self.applied = target;
        Ok(Some(delta))
    }

    /// Set the absolute rotation about one axis, keeping everything else
    pub fn set_rotation(&mut self, axis: Axis, degrees: f64) -> Result<Option<RigidDelta>> {
        let mut target = self.applied;
        target.rotation.set(axis, degrees);
        self.apply_target(target)
    }

    /// Set the absolute shift, keeping the rotation
    pub fn set_shift(&mut self, shift: Vector3d) -> Result<Option<RigidDelta>> {
        let target = PoseTarget::new(self.applied.rotation, shift);
        self.apply_target(target)
    }

    /// Uniformly scale so the extent along `axis` becomes `target_length`
    pub fn scale_uniform(&mut self, axis: Axis, target_length: f64) -> Result<ScaleOutcome> {
        scale_uniform(&mut self.mesh, axis, target_length)
    }

    /// Scale only along `axis` so its extent becomes `target_length`
    pub fn scale_axis_absolute(&mut self, axis: Axis, target_length: f64) -> Result<ScaleOutcome> {
        scale_axis_absolute(&mut self.mesh, axis, target_length)
    }

    /// Bounds readout of the working mesh
    pub fn bounds_text(&self) -> String {
        bounds_text(&self.mesh)
    }

    /// Structured readout of the working mesh
    pub fn readout(&self) -> Readout {
        Readout::of(&self.mesh)
    }

    /// Plot figure of the working mesh
    pub fn figure(&self, options: &RenderOptions) -> Figure {
        render_mesh(&self.mesh, options)
    }

    /// Encode the working mesh for download
    pub fn export(&self, options: &StlWriteOptions) -> Result<Vec<u8>> {
        Ok(encode_stl(&self.mesh, options)?)
    }
}
