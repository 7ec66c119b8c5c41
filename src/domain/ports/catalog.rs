//! Catalog source port.
//!
//! Supplies raw assessment records for indexing. A source may return an
//! empty batch; the index service then leaves the existing index untouched.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Assessment;

/// Trait for assessment catalog sources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Source name (e.g., "static", "shl-live").
    fn name(&self) -> &'static str;

    /// Fetch the full catalog. May be empty.
    async fn fetch_catalog(&self) -> DomainResult<Vec<Assessment>>;
}
