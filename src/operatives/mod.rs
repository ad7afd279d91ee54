//! Operatives: named async capabilities and the registry that maps names to them.

pub mod callback;
pub mod operative;
pub mod registry;

pub use callback::{CallbackOperative, Completer};
pub use operative::Operative;
pub use registry::OperativeRegistry;
