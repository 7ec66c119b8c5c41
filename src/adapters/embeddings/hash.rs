//! Deterministic hash-based embedding provider.
//!
//! Offline fallback used when the primary embedding service is unavailable.
//! Vectors are derived from a SHA-256 digest of the text, so they are fully
//! deterministic but carry no semantic signal: near-duplicate texts produce
//! unrelated vectors. This is a deliberate quality-vs-availability tradeoff —
//! the system always produces *some* vector, at the cost of retrieval
//! quality while degraded.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::errors::DomainResult;
use crate::domain::ports::EmbeddingProvider;

/// Fixed output dimension, matching the primary provider's index generation.
pub const HASH_EMBEDDING_DIMENSION: usize = 384;

/// Deterministic, offline embedding provider.
#[derive(Debug, Clone, Default)]
pub struct HashEmbeddingProvider;

impl HashEmbeddingProvider {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous embedding: hash, map bytes to [0, 1), cycle to 384 dims.
    pub fn embed_sync(text: &str) -> Vec<f32> {
        let digest = Sha256::digest(text.as_bytes());

        // Each digest byte maps to (byte % 100) / 100, giving 32 floats in
        // [0, 1); the sequence then repeats cyclically up to the fixed
        // dimension.
        let base: Vec<f32> = digest.iter().map(|b| f32::from(b % 100) / 100.0).collect();

        base.iter()
            .cycle()
            .take(HASH_EMBEDDING_DIMENSION)
            .copied()
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        HASH_EMBEDDING_DIMENSION
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        Ok(Self::embed_sync(text))
    }
}
