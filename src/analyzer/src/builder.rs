//! Stage and layer report builder.
//!
//! Walks parsed instructions in order, tracking the current stage and the
//! alias table, and produces one annotated [`LayerReport`] per instruction.

use std::collections::HashMap;

use dockerlayers_core::config::AliasPolicy;
use dockerlayers_core::error::{AnalyzeError, Result};

use crate::descriptor::{descriptor_for, is_known};
use crate::instruction::ParsedInstruction;
use crate::report::{LayerReport, Report};

/// Mutable state for one analysis pass.
#[derive(Debug)]
pub struct ReportBuilder {
    report: Report,
    /// Index of the stage being filled, `None` before the first FROM.
    current: Option<usize>,
    /// Lowercased textual alias -> stage index. Numeric refs resolve by position.
    aliases: HashMap<String, usize>,
    alias_policy: AliasPolicy,
}

impl ReportBuilder {
    pub fn new(file_path: impl Into<String>, alias_policy: AliasPolicy) -> Self {
        Self {
            report: Report::new(file_path),
            current: None,
            aliases: HashMap::new(),
            alias_policy,
        }
    }

    /// Feed the next instruction. The first error aborts the whole analysis.
    pub fn push(&mut self, inst: ParsedInstruction) -> Result<()> {
        if inst.keyword.is_empty() {
            return Ok(());
        }

        if inst.keyword == "FROM" {
            return self.start_stage(inst);
        }

        let Some(index) = self.current else {
            return self.push_global(inst);
        };

        if !is_known(&inst.keyword) {
            tracing::warn!(
                line = inst.line,
                instruction = inst.keyword.as_str(),
                "Unknown Dockerfile instruction, treating as metadata"
            );
        }

        let descriptor = descriptor_for(&inst.keyword);
        let notes = self.instruction_notes(&inst);
        let mut layer = LayerReport::new(inst, descriptor);
        layer.notes = notes;
        self.report.ensure_stage(index).push_layer(layer);
        Ok(())
    }

    /// Finish the pass and hand the report to the caller.
    pub fn finish(self) -> Report {
        self.report
    }

    fn start_stage(&mut self, inst: ParsedInstruction) -> Result<()> {
        let index = self.current.map_or(0, |i| i + 1);
        self.current = Some(index);

        let (base, alias) = parse_from(&inst.args);
        let base = base.ok_or(AnalyzeError::MissingBaseImage { line: inst.line })?;

        tracing::debug!(
            line = inst.line,
            stage = index,
            base = base.as_str(),
            alias = alias.as_deref().unwrap_or(""),
            "Stage start"
        );

        let mut notes = vec![format!("Stage resets here and pulls \"{}\".", base)];
        if let Some(alias) = &alias {
            notes.push(self.register_alias(alias, index, inst.line));
        }

        let mut layer = LayerReport::new(inst, descriptor_for("FROM"));
        layer.notes = notes;

        let stage = self.report.ensure_stage(index);
        stage.stage.base = base;
        stage.stage.name = alias.unwrap_or_default();
        stage.push_layer(layer);
        Ok(())
    }

    /// Bind an alias to a stage according to the alias policy, returning the FROM note.
    fn register_alias(&mut self, alias: &str, index: usize, line: usize) -> String {
        if is_index_ref(alias) {
            tracing::warn!(line, alias, stage = index, "Numeric stage alias ignored");
            return format!(
                "Alias \"{}\" is a stage index; COPY --from={} resolves by position, not to this stage.",
                alias, alias
            );
        }

        let key = alias.to_lowercase();
        let previous = self.aliases.get(&key).copied();

        match (previous, self.alias_policy) {
            (Some(prev), AliasPolicy::FirstWins) => {
                tracing::warn!(line, alias, stage = prev, "Duplicate stage alias, keeping first");
                format!(
                    "Alias \"{}\" is already taken by stage {}; COPY --from={} keeps resolving to stage {}.",
                    alias, prev, alias, prev
                )
            }
            (Some(prev), AliasPolicy::LastWins) => {
                tracing::warn!(line, alias, stage = prev, "Duplicate stage alias, shadowing earlier stage");
                self.aliases.insert(key, index);
                format!(
                    "Alias \"{}\" now shadows stage {}; later COPY --from={} resolves to this stage.",
                    alias, prev, alias
                )
            }
            (None, _) => {
                self.aliases.insert(key, index);
                format!(
                    "Alias \"{}\" lets you reference this stage via COPY --from={}.",
                    alias, alias
                )
            }
        }
    }

    fn push_global(&mut self, inst: ParsedInstruction) -> Result<()> {
        // Only ARG is valid before the first FROM.
        if inst.keyword != "ARG" {
            return Err(AnalyzeError::InstructionBeforeFrom {
                line: inst.line,
                keyword: inst.keyword,
            });
        }

        let mut layer = LayerReport::new(inst, descriptor_for("ARG"));
        layer
            .notes
            .push("This ARG applies globally and can be referenced in the first FROM.".to_string());
        self.report.push_global(layer);
        Ok(())
    }

    /// Keyword-specific notes for an instruction inside a stage.
    fn instruction_notes(&self, inst: &ParsedInstruction) -> Vec<String> {
        let mut notes = Vec::new();
        match inst.keyword.as_str() {
            "COPY" => notes.push(self.copy_note(inst)),
            "ADD" => {
                if inst.args.contains("http://") || inst.args.contains("https://") {
                    notes.push(
                        "Remote URLs are downloaded at build time; network changes can invalidate cache."
                            .to_string(),
                    );
                }
                if inst.args.contains(".tar") {
                    notes.push(
                        "Tar archives are auto-extracted, which can surprise caching when archive contents change."
                            .to_string(),
                    );
                }
            }
            "RUN" => notes.push(
                "Cleanup temp files within the same RUN to prevent them from sticking in the layer."
                    .to_string(),
            ),
            "ARG" => notes.push(
                "Only available during build; use ENV if the value is needed at runtime.".to_string(),
            ),
            _ => {}
        }
        notes
    }

    /// Resolve a `--from` reference to a stage started so far.
    fn resolve_stage(&self, source: &str) -> Option<usize> {
        if is_index_ref(source) {
            return source
                .parse::<usize>()
                .ok()
                .filter(|&idx| idx < self.report.stages.len());
        }
        self.aliases.get(&source.to_lowercase()).copied()
    }

    fn copy_note(&self, inst: &ParsedInstruction) -> String {
        let Some(source) = copy_source_stage(&inst.args) else {
            return "Takes files from the build context, so editing those files will invalidate this layer."
                .to_string();
        };

        match self.resolve_stage(source) {
            Some(idx) => {
                let name = self
                    .report
                    .stages
                    .get(idx)
                    .map(|s| s.stage.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(source);
                tracing::debug!(line = inst.line, from = source, stage = idx, "Cross-stage copy");
                format!(
                    "Copies from stage {} ({}). Cache depends on that stage's output instead of local files.",
                    idx, name
                )
            }
            None => format!(
                "Copies from \"{}\". Make sure the stage or image exists.",
                source
            ),
        }
    }
}

/// Build a report from an ordered instruction stream.
pub fn build_report<I>(
    file_path: impl Into<String>,
    instructions: I,
    alias_policy: AliasPolicy,
) -> Result<Report>
where
    I: IntoIterator<Item = ParsedInstruction>,
{
    let mut builder = ReportBuilder::new(file_path, alias_policy);
    for inst in instructions {
        builder.push(inst)?;
    }
    Ok(builder.finish())
}

/// Extract the base image and optional alias from FROM arguments.
///
/// Leading `--flag` tokens (such as `--platform=...`) are skipped.
fn parse_from(args: &str) -> (Option<String>, Option<String>) {
    let mut tokens = args
        .split_whitespace()
        .skip_while(|token| token.starts_with("--"));

    let Some(base) = tokens.next() else {
        return (None, None);
    };

    let alias = match (tokens.next(), tokens.next()) {
        (Some(kw), Some(name)) if kw.eq_ignore_ascii_case("AS") => Some(name.to_string()),
        _ => None,
    };

    (Some(base.to_string()), alias)
}

/// Canonical decimal stage index, such as `0` or `12` but not `01`.
fn is_index_ref(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'))
}

/// Find the `--from` reference of a COPY, in `--from=x` or `--from x` form.
fn copy_source_stage(args: &str) -> Option<&str> {
    let mut tokens = args.split_whitespace();
    while let Some(token) = tokens.next() {
        if let Some(source) = token.strip_prefix("--from=") {
            return Some(source).filter(|s| !s.is_empty());
        }
        if token == "--from" {
            return tokens.next();
        }
    }
    None
}
