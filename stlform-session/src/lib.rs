//! Session layer for stlform
//!
//! The transform engine in `stlform-core` only understands incremental
//! deltas. This crate holds what a front end keeps per upload: the working
//! mesh, the last absolute rotation and shift shown to the user, batch jobs
//! expressed as absolute targets, and a token-keyed store of exported
//! previews.

pub mod job;
pub mod preview;
pub mod session;

pub use job::*;
pub use preview::*;
pub use session::*;
