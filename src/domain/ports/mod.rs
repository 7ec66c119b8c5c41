//! Port traits for external collaborators.
//!
//! Every external dependency (embedding service, generative model, vector
//! index backend, catalog source) is reached through one of these traits so
//! components can be constructed once at startup and injected explicitly.

pub mod catalog;
pub mod embedding;
pub mod generation;
pub mod vector_index;

pub use catalog::CatalogSource;
pub use embedding::EmbeddingProvider;
pub use generation::TextGenerator;
pub use vector_index::{IndexEntry, VectorIndex};
