//! Match report rendering

pub mod formatter;

pub use formatter::{MatchReport, OutputFormat};
