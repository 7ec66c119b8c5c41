//! Configuration model for talentsift.

use serde::{Deserialize, Serialize};

/// Main configuration structure for talentsift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Embedding provider configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Text generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Recommendation pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// API key. Falls back to `GEMINI_API_KEY` env var when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the embedding API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Expected embedding dimension
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_embedding_model() -> String {
    "gemini-embedding-001".to_string()
}

const fn default_dimension() -> usize {
    384
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_embedding_model(),
            dimension: default_dimension(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Text generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// API key. Falls back to `GEMINI_API_KEY` env var when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the generation API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Generation model name
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_generation_model() -> String {
    "gemini-2.5-flash".to_string()
}

const fn default_generation_timeout_secs() -> u64 {
    60
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_generation_model(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Recommendation pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Number of candidates fetched from the index before re-ranking
    #[serde(default = "default_overfetch")]
    pub candidate_overfetch: usize,

    /// Maximum candidates summarized in the re-ranking prompt
    #[serde(default = "default_rerank_window")]
    pub rerank_window: usize,

    /// Default number of recommendations returned
    #[serde(default = "default_result_count")]
    pub default_result_count: usize,
}

const fn default_overfetch() -> usize {
    20
}

const fn default_rerank_window() -> usize {
    15
}

const fn default_result_count() -> usize {
    10
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            candidate_overfetch: default_overfetch(),
            rerank_window: default_rerank_window(),
            default_result_count: default_result_count(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_contract() {
        let config = Config::default();
        assert_eq!(config.pipeline.candidate_overfetch, 20);
        assert_eq!(config.pipeline.rerank_window, 15);
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.generation.model, "gemini-2.5-flash");
    }
}
