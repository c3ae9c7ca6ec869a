//! Report rendering for CLI output.

use std::io::{self, Write};

use comfy_table::{ContentArrangement, Table};
use dockerlayers_analyzer::{Effect, LayerReport, Report};
use dockerlayers_core::OutputFormat;

/// Create a styled table with the given headers.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_header(headers);
    table
}

/// Write `report` in the requested format.
pub fn write_report<W: Write>(w: &mut W, report: &Report, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(w, report),
        OutputFormat::Json => write_json(w, report),
        OutputFormat::Table => write_table(w, report),
    }
}

/// Annotated breakdown of every stage and layer, followed by the legend.
pub fn write_text<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    writeln!(w, "Dockerfile insight for {}", report.file_path)?;
    writeln!(w)?;

    if !report.global.is_empty() {
        writeln!(w, "Global build args (before first FROM):")?;
        for layer in &report.global {
            write_layer(w, layer)?;
        }
        writeln!(w)?;
    }

    for stage in &report.stages {
        writeln!(w, "{}", stage.stage.display_name())?;
        writeln!(w, "  Base image: {}", stage.stage.base)?;
        writeln!(w, "  Layer breakdown:")?;
        for layer in &stage.layers {
            write_layer(w, layer)?;
        }
        writeln!(
            w,
            "  Summary: {} filesystem layers | {} metadata steps | {} build args",
            stage.fs_layers, stage.metadata_layers, stage.build_args
        )?;
        writeln!(w)?;
    }

    writeln!(w, "Legend:")?;
    for effect in Effect::ALL {
        writeln!(w, "  {}: {}", effect, effect.legend())?;
    }
    Ok(())
}

fn write_layer<W: Write>(w: &mut W, layer: &LayerReport) -> io::Result<()> {
    writeln!(
        w,
        "  {:>2}. {:<12} {}",
        layer.number, layer.effect, layer.instruction.raw
    )?;
    writeln!(w, "      Why : {}", layer.explanation)?;
    if !layer.cache_hint.is_empty() {
        writeln!(w, "      Cache: {}", layer.cache_hint)?;
    }
    for note in &layer.notes {
        writeln!(w, "      Note : {}", note)?;
    }
    Ok(())
}

/// The full report as pretty-printed JSON.
pub fn write_json<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)
}

/// One summary row per stage.
pub fn write_table<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    let mut table = new_table(&[
        "STAGE",
        "NAME",
        "BASE",
        "LAYERS",
        "FILESYSTEM",
        "METADATA",
        "BUILD ARGS",
    ]);

    if !report.global.is_empty() {
        let count = report.global.len().to_string();
        table.add_row(["global", "-", "-", count.as_str(), "0", "0", count.as_str()]);
    }

    for stage in &report.stages {
        let name = if stage.stage.name.is_empty() {
            "-"
        } else {
            stage.stage.name.as_str()
        };
        table.add_row([
            stage.stage.index.to_string(),
            name.to_string(),
            stage.stage.base.clone(),
            stage.layers.len().to_string(),
            stage.fs_layers.to_string(),
            stage.metadata_layers.to_string(),
            stage.build_args.to_string(),
        ]);
    }

    writeln!(w, "{table}")
}
