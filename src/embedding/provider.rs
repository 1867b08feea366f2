//! Embedding provider contract and the deterministic hash fallback

use ndarray::Array2;
use sha2::{Digest, Sha256};

/// Dense-vector provider consumed by the similarity scorer.
///
/// Contract: one row per input string, the same vector width on every call,
/// and an empty input yields an empty matrix. Determinism for identical input
/// is required within a process lifetime; semantic quality is not — the
/// scorer only trusts exact lexical matches for coverage decisions.
pub trait EmbeddingProvider: Send + Sync {
    fn encode(&self, texts: &[String]) -> Vec<Vec<f32>>;

    /// Vector width every `encode` call produces.
    fn dimension(&self) -> usize;

    /// Encode into a row-major matrix of shape `(texts.len(), dimension())`.
    fn encode_matrix(&self, texts: &[String]) -> Array2<f32> {
        let dim = self.dimension();
        if texts.is_empty() {
            return Array2::zeros((0, dim));
        }
        let rows = self.encode(texts);
        let mut matrix = Array2::zeros((rows.len(), dim));
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().take(dim).enumerate() {
                matrix[[i, j]] = *value;
            }
        }
        matrix
    }
}

/// Hash-based embedder: SHA-256 digest bytes as a 32-dim L2-normalized vector.
///
/// Semantically blind but deterministic and exact on identical strings, which
/// is all the exact-match coverage gate relies on.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self { dimension: 32 }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let digest = Sha256::digest(text.to_lowercase().as_bytes());
        let mut vec: Vec<f32> = digest
            .iter()
            .take(self.dimension)
            .map(|b| *b as f32)
            .collect();
        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in vec.iter_mut() {
                *v /= norm;
            }
        }
        vec
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn encode(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts.iter().map(|t| self.vector_for(t)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
