pub mod parser;

pub use parser::{parse_group, GroupFormat};
