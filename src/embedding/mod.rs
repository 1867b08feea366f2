//! Embedding vector generation

pub mod provider;
pub mod service;

pub use provider::{EmbeddingProvider, HashEmbedder};
pub use service::global_provider;
