//! Interview configuration, persisted as TOML.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::facts::DEFAULT_MAX_UNKNOWNS;

/// Widest span accepted for the relative partitions.
pub const MAX_PARTITION_HALF_SPAN_YEARS: u32 = 1000;

/// Errors from loading or saving configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read interview config: {path}")]
    #[diagnostic(
        code(lexrule::config::config_read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse interview config: {path}")]
    #[diagnostic(
        code(lexrule::config::config_parse),
        help("Check the TOML syntax in the config file. {message}")
    )]
    ConfigParse { path: String, message: String },

    #[error("failed to write interview config: {path}")]
    #[diagnostic(
        code(lexrule::config::config_write),
        help("Ensure you have write permissions to the config directory.")
    )]
    ConfigWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config value for {field}: {message}")]
    #[diagnostic(
        code(lexrule::config::invalid),
        help("Every limit must be at least 1; partition_half_span_years is at most 1000.")
    )]
    Invalid { field: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Limits and defaults for interviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Most unknown facts collected per evaluation pass.
    #[serde(default = "default_max_unknowns")]
    pub max_unknowns: usize,
    /// Attempts to get a parseable answer before recording `Uncertain`.
    #[serde(default = "default_max_answer_attempts")]
    pub max_answer_attempts: usize,
    /// Years either side of the current year covered by "the year",
    /// "the month" and the other relative partitions.
    #[serde(default = "default_partition_half_span_years")]
    pub partition_half_span_years: u32,
}

fn default_max_unknowns() -> usize {
    DEFAULT_MAX_UNKNOWNS
}
fn default_max_answer_attempts() -> usize {
    3
}
fn default_partition_half_span_years() -> u32 {
    10
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_unknowns: default_max_unknowns(),
            max_answer_attempts: default_max_answer_attempts(),
            partition_half_span_years: default_partition_half_span_years(),
        }
    }
}

impl InterviewConfig {
    /// Reject limits that would make interviews impossible.
    pub fn validate(&self) -> ConfigResult<()> {
        let zero = |field: &str| ConfigError::Invalid {
            field: field.into(),
            message: "must be greater than zero".into(),
        };
        if self.max_unknowns == 0 {
            return Err(zero("max_unknowns"));
        }
        if self.max_answer_attempts == 0 {
            return Err(zero("max_answer_attempts"));
        }
        if self.partition_half_span_years == 0 {
            return Err(zero("partition_half_span_years"));
        }
        if self.partition_half_span_years > MAX_PARTITION_HALF_SPAN_YEARS {
            return Err(ConfigError::Invalid {
                field: "partition_half_span_years".into(),
                message: format!("must be at most {MAX_PARTITION_HALF_SPAN_YEARS}"),
            });
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::ConfigWrite {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::ConfigWrite {
            path: path.display().to_string(),
            source: e,
        })
    }
}
