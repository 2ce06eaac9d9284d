//! Batch transform jobs
//!
//! A job is a JSON document listing steps the way a user would enter them in
//! the UI, with rotations and shifts given as absolute targets:
//!
//! ```json
//! {
//!   "pivot": "centroid",
//!   "steps": [
//!     { "op": "rotate", "z": 90 },
//!     { "op": "shift", "x": 10, "y": -2.5 },
//!     { "op": "scale_uniform", "axis": "x", "length": 100 }
//!   ]
//! }
//! ```

use crate::session::TransformSession;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use stlform_core::{Axis, Error, EulerDegrees, Pivot, Result, RigidDelta, ScaleOutcome, Vector3d};

/// Per-axis absolute targets; omitted axes keep their current value
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisTargets {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl AxisTargets {
    fn merge_into(&self, current: &mut Vector3d) {
        for (slot, target) in current.iter_mut().zip([self.x, self.y, self.z]) {
            if let Some(value) = target {
                *slot = value;
            }
        }
    }
}

/// Length to reach along a reference axis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleTarget {
    pub axis: Axis,
    pub length: f64,
}

/// One step of a job
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JobStep {
    /// Absolute rotation targets in degrees
    Rotate(AxisTargets),
    /// Absolute shift targets in millimeters
    Shift(AxisTargets),
    /// Uniform scale referenced to one axis
    ScaleUniform(ScaleTarget),
    /// Scale a single axis to an absolute length
    ScaleAxis(ScaleTarget),
    /// Change the pivot for later rotations
    UsePivot { pivot: Pivot },
    /// Return to the mesh as loaded
    Reset,
}

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Rigid delta handed to the engine, `None` when skipped as unchanged
    Rigid(Option<RigidDelta>),
    Scaled(ScaleOutcome),
    PivotChanged(Pivot),
    Reset,
}

/// A sequence of steps with a starting pivot
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformJob {
    #[serde(default)]
    pub pivot: Pivot,
    pub steps: Vec<JobStep>,
}

impl TransformJob {
    /// Parse a job from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::invalid_data(format!("invalid job: {e}")))
    }

    /// Read and parse a job file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Run every step against the session, stopping at the first error
    pub fn run(&self, session: &mut TransformSession) -> Result<Vec<StepOutcome>> {
        session.set_pivot(self.pivot);
        self.steps
            .iter()
            .enumerate()
            .map(|(n, step)| {
                debug!("job step {}: {step:?}", n + 1);
                run_step(step, session)
            })
            .collect()
    }
}

fn run_step(step: &JobStep, session: &mut TransformSession) -> Result<StepOutcome> {
    let outcome = match step {
        JobStep::Rotate(targets) => {
            let mut target = session.applied();
            let r = &mut target.rotation;
            let mut angles = Vector3d::new(r.x, r.y, r.z);
            targets.merge_into(&mut angles);
            *r = EulerDegrees::new(angles.x, angles.y, angles.z);
            StepOutcome::Rigid(session.apply_target(target)?)
        }
        JobStep::Shift(targets) => {
            let mut target = session.applied();
            targets.merge_into(&mut target.shift);
            StepOutcome::Rigid(session.apply_target(target)?)
        }
        JobStep::ScaleUniform(ScaleTarget { axis, length }) => {
            StepOutcome::Scaled(session.scale_uniform(*axis, *length)?)
        }
        JobStep::ScaleAxis(ScaleTarget { axis, length }) => {
            StepOutcome::Scaled(session.scale_axis_absolute(*axis, *length)?)
        }
        JobStep::UsePivot { pivot } => {
            session.set_pivot(*pivot);
            StepOutcome::PivotChanged(*pivot)
        }
        JobStep::Reset => {
            session.reset();
            StepOutcome::Reset
        }
    };
    Ok(outcome)
}
