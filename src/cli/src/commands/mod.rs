//! CLI command definitions and dispatch.

mod analyze;
mod version;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dockerlayers_core::{AnalyzerConfig, LogLevel};

/// File name of the per-user configuration under the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Explain the stages, layers and cache behavior of a Dockerfile.
#[derive(Parser)]
#[command(name = "dockerlayers", version, about)]
pub struct Cli {
    /// Configuration file (default: ~/.dockerlayers/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Analyze a Dockerfile and print its stage and layer breakdown
    Analyze(analyze::AnalyzeArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    /// Config file to read: `--config`, else the per-user file when present.
    pub fn config_path(&self) -> Option<PathBuf> {
        config_path(self.config.as_deref(), &default_config_path())
    }

    /// Log level to use when `RUST_LOG` is not set.
    pub fn log_level(&self, config: &AnalyzerConfig) -> tracing::Level {
        if self.verbose {
            LogLevel::Debug.into()
        } else {
            config.log_level.into()
        }
    }
}

/// Return the path to the per-user config directory (~/.dockerlayers).
pub(crate) fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".dockerlayers"))
        .unwrap_or_else(|| PathBuf::from(".dockerlayers"))
}

fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// An explicit path is always used; the fallback only when it exists.
fn config_path(explicit: Option<&Path>, fallback: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if fallback.is_file() => Some(fallback.to_path_buf()),
        None => None,
    }
}

/// Load the config at `path`, or the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> dockerlayers_core::Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::load(path),
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub fn dispatch(cli: Cli, config: AnalyzerConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Analyze(args) => analyze::execute(args, config),
        Command::Version(args) => version::execute(args),
    }
}
