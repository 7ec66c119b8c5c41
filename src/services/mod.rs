//! Service layer: pipeline components and orchestration.

pub mod balancer;
pub mod evaluation;
pub mod indexer;
pub mod query_analyzer;
pub mod recommender;
pub mod reranker;

pub use indexer::{IndexService, IndexStatus};
pub use query_analyzer::QueryAnalyzer;
pub use recommender::RecommendPipeline;
pub use reranker::Reranker;
