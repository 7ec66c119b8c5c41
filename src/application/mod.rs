//! Application wiring: construct components once and inject explicitly.
//!
//! No ambient globals: every collaborator is built here at process start
//! and handed to the services that need it.

use std::sync::Arc;

use anyhow::Result;

use crate::adapters::catalog::StaticCatalog;
use crate::adapters::embeddings::{FallbackEmbedder, GeminiEmbeddingProvider};
use crate::adapters::generation::GeminiTextGenerator;
use crate::adapters::index::InMemoryVectorIndex;
use crate::domain::models::Config;
use crate::domain::ports::{EmbeddingProvider, TextGenerator, VectorIndex};
use crate::services::{IndexService, QueryAnalyzer, RecommendPipeline, Reranker};

/// Fully wired application components.
pub struct AppContext {
    pub pipeline: RecommendPipeline,
    pub index_service: Arc<IndexService>,
}

impl AppContext {
    /// Build the full component graph from configuration.
    ///
    /// The Gemini embedding provider is always wrapped in the hash fallback
    /// so the pipeline keeps producing vectors when the service is down.
    pub fn from_config(config: &Config) -> Result<Self> {
        let primary = GeminiEmbeddingProvider::new(config.embedding.clone())?;
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(FallbackEmbedder::new(Arc::new(primary)));

        let generator: Arc<dyn TextGenerator> =
            Arc::new(GeminiTextGenerator::new(config.generation.clone())?);

        let index: Arc<dyn VectorIndex> = Arc::new(InMemoryVectorIndex::new());

        let index_service = Arc::new(IndexService::new(
            Arc::new(StaticCatalog::new()),
            embedder.clone(),
            index.clone(),
        ));

        let pipeline = RecommendPipeline::new(
            QueryAnalyzer::new(generator.clone()),
            embedder,
            index,
            Reranker::new(generator).with_window(config.pipeline.rerank_window),
            config.pipeline.clone(),
        );

        Ok(Self {
            pipeline,
            index_service,
        })
    }
}
