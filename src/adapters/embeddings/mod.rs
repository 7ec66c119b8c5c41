//! Embedding provider adapters.

pub mod fallback;
pub mod gemini;
pub mod hash;

pub use fallback::FallbackEmbedder;
pub use gemini::GeminiEmbeddingProvider;
pub use hash::{HashEmbeddingProvider, HASH_EMBEDDING_DIMENSION};
