//! Vector index port for nearest-neighbor candidate retrieval.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Assessment, Candidate};

/// One (id, vector, payload) triple to be stored in the index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Unique entry ID.
    pub id: String,
    /// Stored vector. All vectors in one index generation share a dimension.
    pub vector: Vec<f32>,
    /// The assessment payload returned at search time.
    pub assessment: Assessment,
}

/// Trait for vector index backends.
///
/// Distances are cosine distance (0 = identical direction, 2 = opposite),
/// ordered ascending. The index and the assessment payloads are re-populated
/// together; `clear()` followed by `add()` is the full-replacement path and
/// callers coordinate the two so no search observes a half-written index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Bulk-insert entries.
    async fn add(&self, entries: Vec<IndexEntry>) -> DomainResult<()>;

    /// Return up to `k` nearest neighbors, ascending by cosine distance.
    ///
    /// `k` is clamped to `count()`; an empty index yields an empty result,
    /// never an error.
    async fn search(&self, query_vector: &[f32], k: usize) -> DomainResult<Vec<Candidate>>;

    /// Remove all entries.
    async fn clear(&self) -> DomainResult<()>;

    /// Number of stored entries.
    async fn count(&self) -> DomainResult<usize>;
}
