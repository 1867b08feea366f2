//! External collaborator interfaces (taxonomy, generative extraction)
//!
//! Every collaborator call either returns well-shaped data or `Unavailable`;
//! the aggregator treats `Unavailable` identically to "empty list" and falls
//! back to the next narrower step, never distinguishing transient from
//! permanent failure.

pub mod extractor;
pub mod taxonomy;

use std::fmt;

/// Marker error for a collaborator that produced no usable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unavailable;

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collaborator unavailable")
    }
}

impl std::error::Error for Unavailable {}

pub type ClientResult<T> = std::result::Result<T, Unavailable>;

pub use extractor::{ExtractedSkill, GeminiExtractor, GenerativeExtractor};
pub use taxonomy::{OnetClient, TaxonomyClient, TaxonomySkill};
