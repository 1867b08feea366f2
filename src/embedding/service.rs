//! Process-wide embedding provider, built once and shared read-only

use crate::embedding::provider::{EmbeddingProvider, HashEmbedder};
use log::info;
use std::sync::OnceLock;

static PROVIDER: OnceLock<Box<dyn EmbeddingProvider>> = OnceLock::new();

/// Return the shared embedding provider, building it on first use.
///
/// The one-shot initializer guarantees the build happens at most once per
/// process even when match requests run concurrently.
pub fn global_provider() -> &'static dyn EmbeddingProvider {
    PROVIDER
        .get_or_init(|| {
            info!("Initializing hash-based embedding provider (32 dims)");
            Box::new(HashEmbedder::new())
        })
        .as_ref()
}
