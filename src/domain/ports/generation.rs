//! Text generation port.
//!
//! Abstracts the generative model used for query analysis and candidate
//! re-ranking. Generation backends are unreliable by contract: callers must
//! wrap every call with their documented fallback.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for generative text backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name (e.g., "gemini").
    fn name(&self) -> &'static str;

    /// Generate a free-form text completion for a prompt.
    ///
    /// May fail or time out; timeouts are ordinary failures, not fatal.
    async fn generate(&self, prompt: &str) -> DomainResult<String>;
}
