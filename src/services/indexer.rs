//! Catalog indexing with observable re-index state.
//!
//! Re-indexing replaces the whole index from a catalog source: fetch
//! records, embed their searchable text, then clear and bulk-add. The run is
//! serialized behind a mutex so concurrent triggers cannot interleave, and
//! embeddings are computed before the index is touched so a failed fetch or
//! embed leaves the previous index fully usable. State is observable for
//! health checks and tests instead of a fire-and-forget task.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{CatalogSource, EmbeddingProvider, IndexEntry, VectorIndex};

/// Observable state of the most recent re-index run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// No re-index has run yet.
    Idle,
    /// A re-index is currently running.
    Running,
    /// The last re-index completed, indexing this many records.
    Done { indexed: usize },
    /// The last re-index failed; the previous index was preserved.
    Failed { error: String },
}

/// Service that (re)builds the vector index from a catalog source.
pub struct IndexService {
    catalog: Arc<dyn CatalogSource>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    status: RwLock<IndexStatus>,
    reindex_lock: Mutex<()>,
}

impl IndexService {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            catalog,
            embedder,
            index,
            status: RwLock::new(IndexStatus::Idle),
            reindex_lock: Mutex::new(()),
        }
    }

    /// Current re-index status.
    pub async fn status(&self) -> IndexStatus {
        self.status.read().await.clone()
    }

    /// Number of documents currently indexed.
    pub async fn indexed_count(&self) -> DomainResult<usize> {
        self.index.count().await
    }

    /// Run a full re-index, returning the number of records indexed.
    ///
    /// A catalog that yields zero records aborts the run with
    /// `DomainError::CatalogEmpty` and leaves the existing index untouched.
    pub async fn reindex(&self) -> DomainResult<usize> {
        let _guard = self.reindex_lock.lock().await;
        *self.status.write().await = IndexStatus::Running;

        match self.run_reindex().await {
            Ok(indexed) => {
                *self.status.write().await = IndexStatus::Done { indexed };
                Ok(indexed)
            }
            Err(err) => {
                tracing::error!(error = %err, "Re-index failed, previous index preserved");
                *self.status.write().await = IndexStatus::Failed {
                    error: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Spawn a background re-index. The returned handle can be awaited by
    /// tests and startup code; health checks poll `status()` instead.
    pub fn spawn_reindex(self: &Arc<Self>) -> tokio::task::JoinHandle<DomainResult<usize>> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.reindex().await })
    }

    async fn run_reindex(&self) -> DomainResult<usize> {
        tracing::info!(source = self.catalog.name(), "Starting catalog re-index");

        let mut records = self.catalog.fetch_catalog().await?;
        if records.is_empty() {
            return Err(DomainError::CatalogEmpty);
        }

        for record in &mut records {
            record.truncate_description();
        }

        let documents: Vec<String> = records.iter().map(|r| r.searchable_text()).collect();
        let vectors = self.embedder.embed_batch(&documents).await?;

        let entries: Vec<IndexEntry> = records
            .into_iter()
            .zip(vectors)
            .enumerate()
            .map(|(i, (assessment, vector))| IndexEntry {
                id: format!("assessment_{i}"),
                vector,
                assessment,
            })
            .collect();

        // All embeddings are in hand; the clear-to-add window is the only
        // moment a concurrent search can see fewer documents.
        let indexed = entries.len();
        self.index.clear().await?;
        self.index.add(entries).await?;

        tracing::info!(indexed, "Catalog re-index complete");
        Ok(indexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticCatalog;
    use crate::adapters::embeddings::HashEmbeddingProvider;
    use crate::adapters::index::InMemoryVectorIndex;
    use crate::domain::models::Assessment;
    use async_trait::async_trait;

    struct EmptyCatalog;

    #[async_trait]
    impl CatalogSource for EmptyCatalog {
        fn name(&self) -> &'static str {
            "empty"
        }
        async fn fetch_catalog(&self) -> DomainResult<Vec<Assessment>> {
            Ok(Vec::new())
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogSource for FailingCatalog {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn fetch_catalog(&self) -> DomainResult<Vec<Assessment>> {
            Err(DomainError::IndexError("fetch failed".to_string()))
        }
    }

    fn service(catalog: Arc<dyn CatalogSource>) -> (Arc<IndexService>, Arc<InMemoryVectorIndex>) {
        let index = Arc::new(InMemoryVectorIndex::new());
        let service = Arc::new(IndexService::new(
            catalog,
            Arc::new(HashEmbeddingProvider::new()),
            index.clone(),
        ));
        (service, index)
    }

    #[tokio::test]
    async fn reindex_populates_the_index() {
        let (service, index) = service(Arc::new(StaticCatalog::new()));

        assert_eq!(service.status().await, IndexStatus::Idle);
        let indexed = service.reindex().await.unwrap();

        assert_eq!(indexed, StaticCatalog::records().len());
        assert_eq!(index.count().await.unwrap(), indexed);
        assert_eq!(service.status().await, IndexStatus::Done { indexed });
    }

    #[tokio::test]
    async fn empty_catalog_aborts_and_preserves_index() {
        let (service, index) = service(Arc::new(StaticCatalog::new()));
        service.reindex().await.unwrap();
        let before = index.count().await.unwrap();

        let empty_service = IndexService::new(
            Arc::new(EmptyCatalog),
            Arc::new(HashEmbeddingProvider::new()),
            index.clone(),
        );
        let result = empty_service.reindex().await;

        assert!(matches!(result, Err(DomainError::CatalogEmpty)));
        assert_eq!(index.count().await.unwrap(), before);
        assert!(matches!(
            empty_service.status().await,
            IndexStatus::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn fetch_failure_preserves_previous_index() {
        let index = Arc::new(InMemoryVectorIndex::new());
        let good = IndexService::new(
            Arc::new(StaticCatalog::new()),
            Arc::new(HashEmbeddingProvider::new()),
            index.clone(),
        );
        good.reindex().await.unwrap();
        let before = index.count().await.unwrap();

        let bad = IndexService::new(
            Arc::new(FailingCatalog),
            Arc::new(HashEmbeddingProvider::new()),
            index.clone(),
        );
        assert!(bad.reindex().await.is_err());
        assert_eq!(index.count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn spawned_reindex_is_awaitable() {
        let (service, _index) = service(Arc::new(StaticCatalog::new()));

        let handle = service.spawn_reindex();
        let indexed = handle.await.unwrap().unwrap();

        assert_eq!(indexed, StaticCatalog::records().len());
        assert_eq!(service.status().await, IndexStatus::Done { indexed });
    }

    #[tokio::test]
    async fn reindex_is_idempotent() {
        let (service, index) = service(Arc::new(StaticCatalog::new()));
        service.reindex().await.unwrap();
        service.reindex().await.unwrap();
        assert_eq!(
            index.count().await.unwrap(),
            StaticCatalog::records().len()
        );
    }
}
