//! Domain layer: descriptors and results shared by every runner.
//!
//! Submodules:
//! - [`model`]: Op descriptors, sequences, results and statuses.

pub mod model;
