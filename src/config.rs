//! Configuration management for the evaluation pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub evaluation: EvaluationConfig,
    pub logging: LoggingConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV with raw transactions (eventId, transactionTime, transactionAmount, ...)
    pub transactions_path: String,
    /// CSV listing the eventIds of confirmed fraudulent transactions
    pub labels_path: String,
    /// CSV with model scores per eventId
    pub scores_path: String,
    /// Destination for the JSON evaluation summary
    pub summary_path: String,
}

/// Evaluation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Investigative capacity per calendar month
    pub capacity_per_period: usize,
    /// Number of random-baseline bootstrap trials
    pub trial_count: usize,
    /// Base seed for the bootstrap trials; omit for OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                transactions_path: "data/raw/transactions.csv".to_string(),
                labels_path: "data/raw/labels.csv".to_string(),
                scores_path: "data/predictions.csv".to_string(),
                summary_path: "data/evaluation_summary.json".to_string(),
            },
            evaluation: EvaluationConfig {
                capacity_per_period: 400,
                trial_count: 1000,
                seed: Some(42),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.evaluation.capacity_per_period, 400);
        assert_eq!(config.evaluation.trial_count, 1000);
        assert_eq!(config.evaluation.seed, Some(42));
        assert_eq!(config.data.transactions_path, "data/raw/transactions.csv");
    }
}
