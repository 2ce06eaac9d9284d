//! Axis-referenced scaling
//!
//! Both modes derive one factor from `target_length / current_length` along a
//! reference axis and multiply about the world origin, so a mesh that is not
//! centered on the origin moves as it grows or shrinks.

use crate::axis::Axis;
use crate::bounds;
use crate::error::{Error, Result};
use crate::mesh::TriangleSoup;
use log::{debug, warn};

/// What a scaling call did to the mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleOutcome {
    /// Coordinates were multiplied by `factor`
    Applied { factor: f64 },
    /// The reference axis had zero length, so no factor could be derived
    Skipped,
}

impl ScaleOutcome {
    /// Factor that was applied, if any
    pub fn factor(&self) -> Option<f64> {
        match self {
            ScaleOutcome::Applied { factor } => Some(*factor),
            ScaleOutcome::Skipped => None,
        }
    }
}

fn scale_factor(mesh: &TriangleSoup, axis: Axis, target_length: f64) -> Result<Option<f64>> {
    if !target_length.is_finite() {
        return Err(Error::invalid_argument(format!(
            "target length along {axis} must be finite, got {target_length}"
        )));
    }

    let current = bounds::axis_length(mesh, axis);
    if current == 0.0 {
        warn!("{axis} extent is zero; cannot derive a scale factor, leaving mesh unchanged");
        return Ok(None);
    }

    Ok(Some(target_length / current))
}

/// Scale every coordinate so the mesh's extent along `axis` becomes `target_length`
///
/// All three axes are multiplied by the same factor. A zero-length reference
/// axis (including an empty mesh) is a no-op and reported as
/// [`ScaleOutcome::Skipped`].
pub fn scale_uniform(mesh: &mut TriangleSoup, axis: Axis, target_length: f64) -> Result<ScaleOutcome> {
    let Some(factor) = scale_factor(mesh, axis, target_length)? else {
        return Ok(ScaleOutcome::Skipped);
    };

    debug!(
        "scaling {} triangles uniformly by {factor} ({axis} -> {target_length})",
        mesh.triangle_count()
    );
    for vertex in mesh.vertices_mut() {
        vertex.coords *= factor;
    }
    Ok(ScaleOutcome::Applied { factor })
}

/// Scale only the `axis` component so the extent along it becomes `target_length`
///
/// The other two components are left exactly as they were, which makes calls
/// on different axes commute. Same zero-length guard as [`scale_uniform`].
pub fn scale_axis_absolute(
    mesh: &mut TriangleSoup,
    axis: Axis,
    target_length: f64,
) -> Result<ScaleOutcome> {
    let Some(factor) = scale_factor(mesh, axis, target_length)? else {
        return Ok(ScaleOutcome::Skipped);
    };

    debug!(
        "scaling {} triangles along {axis} by {factor} (-> {target_length})",
        mesh.triangle_count()
    );
    let i = axis.index();
    for vertex in mesh.vertices_mut() {
        vertex[i] *= factor;
    }
    Ok(ScaleOutcome::Applied { factor })
}
