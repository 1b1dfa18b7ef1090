//! Text formats for exporting and importing search results.

pub mod dump;
pub mod ids;

pub use dump::{DumpError, DumpResult};
