//! `dockerlayers analyze` command: explain a Dockerfile layer by layer.
//!
//! Resolves the Dockerfile path and options from flags and config, runs the
//! analyzer, and writes the report to stdout in the selected format.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use dockerlayers_core::{AliasPolicy, AnalyzerConfig, OutputFormat};

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the Dockerfile to inspect (default: ./Dockerfile)
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Output format: text, json or table
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// How a stage alias declared twice resolves: first-wins or last-wins
    #[arg(long = "alias-policy")]
    pub alias_policy: Option<AliasPolicy>,
}

impl AnalyzeArgs {
    /// Layer command-line flags over the loaded configuration.
    fn apply(self, mut config: AnalyzerConfig) -> AnalyzerConfig {
        if let Some(file) = self.file {
            config.dockerfile = file;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(policy) = self.alias_policy {
            config.alias_policy = policy;
        }
        config
    }
}

pub fn execute(args: AnalyzeArgs, config: AnalyzerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.apply(config);
    let report = dockerlayers_analyzer::analyze_file(&config.dockerfile, &config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_report(&mut out, &report, config.format)?;
    out.flush()?;
    Ok(())
}
