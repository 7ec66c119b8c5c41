//! Embedding provider with degraded fallback.
//!
//! Wraps a primary provider and the deterministic hash provider. Any primary
//! failure (network, auth, malformed response) is logged and replaced by the
//! hash vector for that item only — batch embedding never skips or aborts.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::ports::EmbeddingProvider;

use super::hash::HashEmbeddingProvider;

/// Embedding provider that never fails to produce a vector.
pub struct FallbackEmbedder {
    primary: Arc<dyn EmbeddingProvider>,
    fallback: HashEmbeddingProvider,
}

impl FallbackEmbedder {
    pub fn new(primary: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            primary,
            fallback: HashEmbeddingProvider::new(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FallbackEmbedder {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn dimension(&self) -> usize {
        self.primary.dimension()
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        match self.primary.embed(text).await {
            Ok(vector) => Ok(vector),
            Err(err) => {
                tracing::warn!(
                    provider = self.primary.name(),
                    error = %err,
                    "Primary embedding failed, using hash fallback"
                );
                Ok(HashEmbeddingProvider::embed_sync(text))
            }
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        // Sequential by contract: a failure in item i falls back for item i
        // only, and upstream rate limits see at most one request at a time.
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}
