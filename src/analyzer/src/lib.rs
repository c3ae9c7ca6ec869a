//! dockerlayers Analyzer - Dockerfile stage and layer analysis.
//!
//! Turns Dockerfile text into a [`Report`]: the global build args, every
//! build stage with its base image and alias, and one annotated layer per
//! instruction explaining its effect and what invalidates its cache.
//!
//! The pipeline runs in a single forward pass:
//!
//! ```text
//! text -> lines::assemble -> instruction::parse_instruction -> builder::ReportBuilder -> Report
//! ```

pub mod builder;
pub mod descriptor;
pub mod instruction;
pub mod lines;
pub mod report;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dockerlayers_core::config::AnalyzerConfig;
use dockerlayers_core::error::{AnalyzeError, Result};

// Re-export common types
pub use builder::{build_report, ReportBuilder};
pub use descriptor::{descriptor_for, Descriptor, Effect};
pub use instruction::{parse_instruction, ParsedInstruction};
pub use lines::RawInstruction;
pub use report::{LayerReport, Report, StageInfo, StageReport};

/// Analyze Dockerfile text. `file_path` is recorded in the report as given.
pub fn analyze_str(content: &str, file_path: &str, config: &AnalyzerConfig) -> Result<Report> {
    let raw = lines::assemble(content)?;
    analyze_instructions(raw, file_path, config)
}

/// Analyze a Dockerfile read line by line from `reader`.
pub fn analyze_reader<R: BufRead>(
    reader: R,
    file_path: &str,
    config: &AnalyzerConfig,
) -> Result<Report> {
    let raw = lines::assemble_reader(reader)?;
    analyze_instructions(raw, file_path, config)
}

/// Analyze the Dockerfile at `path`. The report carries the absolute path.
pub fn analyze_file(path: &Path, config: &AnalyzerConfig) -> Result<Report> {
    let full_path = std::path::absolute(path)?;
    let file = File::open(&full_path).map_err(|e| {
        AnalyzeError::IoError(std::io::Error::new(
            e.kind(),
            format!("failed to open Dockerfile at {}: {}", full_path.display(), e),
        ))
    })?;
    analyze_reader(
        BufReader::new(file),
        &full_path.display().to_string(),
        config,
    )
}

fn analyze_instructions(
    raw: Vec<RawInstruction>,
    file_path: &str,
    config: &AnalyzerConfig,
) -> Result<Report> {
    if raw.is_empty() {
        return Err(AnalyzeError::EmptyInput {
            path: file_path.to_string(),
        });
    }

    let report = build_report(
        file_path,
        raw.iter().map(parse_instruction),
        config.alias_policy,
    )?;

    tracing::debug!(
        path = file_path,
        stages = report.stages.len(),
        layers = report.layer_count(),
        "Dockerfile analyzed"
    );
    Ok(report)
}
