//! Talentsift - Assessment Recommendation Engine
//!
//! Talentsift recommends professional assessments for free-text hiring
//! queries by retrieving candidates from a vector index and re-ranking them
//! with a generative model, with a diversity pass across requested test-type
//! categories.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, port traits and errors
//! - **Application Layer** (`application`): Component wiring
//! - **Service Layer** (`services`): Pipeline components and orchestration
//! - **Adapters** (`adapters`): Concrete port implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::AppContext;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Assessment, Candidate, Config, ExperienceLevel, QueryAnalysis, SupportFlag, TestType,
};
pub use domain::ports::{
    CatalogSource, EmbeddingProvider, IndexEntry, TextGenerator, VectorIndex,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{IndexService, IndexStatus, RecommendPipeline};
