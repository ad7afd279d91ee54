//! Public API layer: the engine entry point.

mod runner;

pub use runner::{Shunt, ShuntBuilder};
