//! Domain models for the talentsift recommendation engine.

pub mod analysis;
pub mod assessment;
pub mod config;

pub use analysis::{ExperienceLevel, QueryAnalysis};
pub use assessment::{
    Assessment, Candidate, SupportFlag, TestType, DEFAULT_DURATION_MINUTES, MAX_DESCRIPTION_LEN,
};
pub use config::{Config, EmbeddingConfig, GenerationConfig, LoggingConfig, PipelineConfig};
