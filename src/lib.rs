//! # stlform
//!
//! Rotate, shift and rescale STL triangle meshes.
//!
//! This is the umbrella crate that re-exports every stlform crate behind
//! feature flags. Use the individual crates for finer control over
//! dependencies.
//!
//! ## Quick Start
//!
//! ```rust
//! use stlform::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut mesh = TriangleSoup::unit_cube();
//!     let delta = RigidDelta::new(EulerDegrees::new(0.0, 0.0, 90.0), Vector3d::new(0.0, 0.0, 5.0));
//!     apply_rigid(&mut mesh, &delta, Pivot::Origin)?;
//!
//!     scale_uniform(&mut mesh, Axis::X, 10.0)?;
//!     assert!((mesh.axis_length(Axis::Z) - 10.0).abs() < 1e-9);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, io, and view
//! - `io`: STL reading and writing
//! - `view`: Bounds readouts and plot figures
//! - `session`: Absolute-target sessions, batch jobs, and preview tokens
//! - `all`: Enables all features

// Re-export core functionality
pub use stlform_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use stlform_io as io;

#[cfg(feature = "view")]
pub use stlform_view as view;

#[cfg(feature = "session")]
pub use stlform_session as session;

/// Convenient imports for common use cases
pub mod prelude {
    pub use stlform_core::*;

    #[cfg(feature = "io")]
    pub use stlform_io::{read_mesh, write_mesh, StlFormat, StlWriteOptions};

    #[cfg(feature = "view")]
    pub use stlform_view::{bounds_text, render_mesh, RenderOptions};

    #[cfg(feature = "session")]
    pub use stlform_session::{PoseTarget, TransformJob, TransformSession};
}
