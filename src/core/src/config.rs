use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzeError, Result};

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Dockerfile to analyze when none is given on the command line
    pub dockerfile: PathBuf,

    /// How a stage alias declared twice is resolved
    pub alias_policy: AliasPolicy,

    /// Report output format
    pub format: OutputFormat,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: LogLevel,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dockerfile: PathBuf::from("Dockerfile"),
            alias_policy: AliasPolicy::default(),
            format: OutputFormat::default(),
            log_level: LogLevel::Warn,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzeError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }
}

/// Resolution rule for a stage alias that more than one FROM declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasPolicy {
    /// The earliest stage keeps the alias.
    #[default]
    FirstWins,
    /// The latest stage takes the alias over.
    LastWins,
}

impl std::fmt::Display for AliasPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstWins => write!(f, "first-wins"),
            Self::LastWins => write!(f, "last-wins"),
        }
    }
}

impl std::str::FromStr for AliasPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first-wins" => Ok(Self::FirstWins),
            "last-wins" => Ok(Self::LastWins),
            _ => Err(format!(
                "unknown alias policy: '{}' (supported: first-wins, last-wins)",
                s
            )),
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Annotated, human-readable layer breakdown (default).
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
    /// One summary row per stage.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!(
                "unknown output format: '{}' (supported: text, json, table)",
                s
            )),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
