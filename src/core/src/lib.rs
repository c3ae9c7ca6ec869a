//! dockerlayers Core - Shared Types
//!
//! Error and configuration types used by the analyzer and the CLI.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{AliasPolicy, AnalyzerConfig, LogLevel, OutputFormat};
pub use error::{AnalyzeError, Result};

/// dockerlayers version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
