//! Domain errors for the talentsift recommendation engine.

use thiserror::Error;

/// Domain-level errors that can occur in the talentsift system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Vector index error: {0}")]
    IndexError(String),

    #[error("Vector index is empty")]
    IndexEmpty,

    #[error("Catalog source returned no records")]
    CatalogEmpty,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Evaluation error: {0}")]
    EvaluationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
