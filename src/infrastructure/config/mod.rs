//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid embedding dimension: {0}. Must be positive")]
    InvalidDimension(usize),

    #[error("Invalid timeout: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid candidate overfetch: {0}. Must be at least 1")]
    InvalidOverfetch(usize),

    #[error("Invalid rerank window: {0}. Must be at least 1")]
    InvalidRerankWindow(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `talentsift.yaml` in the working directory
    /// 3. Environment variables (`TALENTSIFT_` prefix)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("talentsift.yaml"))
            .merge(Env::prefixed("TALENTSIFT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }

        if config.embedding.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.embedding.timeout_secs));
        }

        if config.generation.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.generation.timeout_secs));
        }

        if config.pipeline.candidate_overfetch == 0 {
            return Err(ConfigError::InvalidOverfetch(
                config.pipeline.candidate_overfetch,
            ));
        }

        if config.pipeline.rerank_window == 0 {
            return Err(ConfigError::InvalidRerankWindow(
                config.pipeline.rerank_window,
            ));
        }

        Ok(())
    }
}
