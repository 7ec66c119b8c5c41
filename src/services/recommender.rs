//! End-to-end recommendation pipeline.
//!
//! Composes query analysis, query embedding, nearest-neighbor retrieval,
//! LLM re-ranking and diversity balancing. Analysis and embedding both
//! depend only on the query and run concurrently; the remaining steps are
//! strictly sequential. Pipeline-internal failures degrade to an empty
//! result; only an empty index is a distinct caller-visible condition,
//! surfaced by the index service rather than by this pipeline.

use std::sync::Arc;

use crate::domain::models::{Assessment, PipelineConfig};
use crate::domain::ports::{EmbeddingProvider, VectorIndex};

use super::balancer;
use super::query_analyzer::QueryAnalyzer;
use super::reranker::Reranker;

/// The recommendation pipeline orchestrator.
pub struct RecommendPipeline {
    analyzer: QueryAnalyzer,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    reranker: Reranker,
    config: PipelineConfig,
}

impl RecommendPipeline {
    pub fn new(
        analyzer: QueryAnalyzer,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        reranker: Reranker,
        config: PipelineConfig,
    ) -> Self {
        Self {
            analyzer,
            embedder,
            index,
            reranker,
            config,
        }
    }

    /// Recommend up to `n` assessments for a free-text query.
    ///
    /// Never errors: upstream failures are absorbed by component fallbacks,
    /// and anything unrecoverable yields an empty list.
    pub async fn recommend(&self, query: &str, n: usize) -> Vec<Assessment> {
        tracing::info!(query, n, "Processing recommendation query");

        // Steps 1 and 2 are independent of each other.
        let (analysis, query_vector) =
            tokio::join!(self.analyzer.analyze(query), self.embedder.embed(query));

        let query_vector = match query_vector {
            Ok(vector) => vector,
            Err(err) => {
                tracing::error!(error = %err, "Query embedding failed, returning no results");
                return Vec::new();
            }
        };

        // Fixed over-fetch to give the reranker and balancer room to work.
        let candidates = match self
            .index
            .search(&query_vector, self.config.candidate_overfetch)
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::error!(error = %err, "Candidate search failed, returning no results");
                return Vec::new();
            }
        };

        if candidates.is_empty() {
            tracing::debug!("No candidates retrieved");
            return Vec::new();
        }

        let reranked = self.reranker.rerank(query, &analysis, candidates, n).await;
        let balanced = balancer::balance(reranked, &analysis.test_types);

        balanced
            .into_iter()
            .take(n)
            .map(|c| c.assessment)
            .collect()
    }
}
