//! The two run modes of the tool.
//!

mod fetch;
mod verify;

pub use fetch::*;
pub use verify::*;
