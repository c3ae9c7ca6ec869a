//! Analysis report model.

use serde::Serialize;

use crate::descriptor::{Descriptor, Effect};
use crate::instruction::ParsedInstruction;

/// One annotated instruction inside a stage or the global ARG list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerReport {
    /// 1-based position within the owning list.
    pub number: usize,
    pub instruction: ParsedInstruction,
    pub effect: Effect,
    pub explanation: String,
    pub cache_hint: String,
    pub notes: Vec<String>,
}

impl LayerReport {
    pub(crate) fn new(instruction: ParsedInstruction, descriptor: Descriptor) -> Self {
        Self {
            number: 0,
            instruction,
            effect: descriptor.effect,
            explanation: descriptor.explanation.to_string(),
            cache_hint: descriptor.cache_hint.to_string(),
            notes: Vec::new(),
        }
    }
}

/// Identity of a build stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    /// 0-based position among FROM instructions.
    pub index: usize,
    /// Alias from `AS <name>`, empty when the stage has none.
    pub name: String,
    /// Base image token from FROM.
    pub base: String,
}

impl StageInfo {
    /// `Stage <index>` or `Stage <index> (<alias>)`.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Stage {}", self.index)
        } else {
            format!("Stage {} ({})", self.index, self.name)
        }
    }
}

/// Layers and per-effect counts of one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: StageInfo,
    pub layers: Vec<LayerReport>,
    pub fs_layers: usize,
    pub metadata_layers: usize,
    pub build_args: usize,
}

impl StageReport {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            stage: StageInfo {
                index,
                ..StageInfo::default()
            },
            ..Self::default()
        }
    }

    /// Append a layer, numbering it and updating the effect counters.
    pub(crate) fn push_layer(&mut self, mut layer: LayerReport) {
        match layer.effect {
            Effect::Filesystem => self.fs_layers += 1,
            Effect::Metadata => self.metadata_layers += 1,
            Effect::BuildArg => self.build_args += 1,
            Effect::StageStart => {}
        }
        layer.number = self.layers.len() + 1;
        self.layers.push(layer);
    }

    /// First layer with the given keyword.
    pub fn find_layer(&self, keyword: &str) -> Option<&LayerReport> {
        self.layers
            .iter()
            .find(|layer| layer.instruction.keyword == keyword)
    }
}

/// Result of analyzing one Dockerfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub file_path: String,
    /// ARG instructions before the first FROM.
    pub global: Vec<LayerReport>,
    /// Stages in FROM order; `stages[i].stage.index == i`.
    pub stages: Vec<StageReport>,
}

impl Report {
    pub(crate) fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub(crate) fn push_global(&mut self, mut layer: LayerReport) {
        layer.number = self.global.len() + 1;
        self.global.push(layer);
    }

    /// Return the stage at `index`, creating it and any missing predecessors.
    pub(crate) fn ensure_stage(&mut self, index: usize) -> &mut StageReport {
        while self.stages.len() <= index {
            let next = self.stages.len();
            self.stages.push(StageReport::new(next));
        }
        &mut self.stages[index]
    }

    /// Total number of layers across the global list and all stages.
    pub fn layer_count(&self) -> usize {
        self.global.len() + self.stages.iter().map(|s| s.layers.len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::descriptor_for;

    fn layer(keyword: &str) -> LayerReport {
        let instruction = ParsedInstruction {
            line: 1,
            keyword: keyword.to_string(),
            args: String::new(),
            raw: keyword.to_string(),
        };
        LayerReport::new(instruction, descriptor_for(keyword))
    }

    #[test]
    fn test_ensure_stage_fills_gaps() {
        let mut report = Report::new("Dockerfile");
        report.ensure_stage(2);
        assert_eq!(report.stages.len(), 3);
        for (i, stage) in report.stages.iter().enumerate() {
            assert_eq!(stage.stage.index, i);
        }
    }

    #[test]
    fn test_ensure_stage_idempotent() {
        let mut report = Report::new("Dockerfile");
        report.ensure_stage(0).stage.base = "alpine".to_string();
        let stage = report.ensure_stage(0);
        assert_eq!(stage.stage.base, "alpine");
        assert_eq!(report.stages.len(), 1);
    }

    #[test]
    fn test_push_layer_numbers_and_counts() {
        let mut stage = StageReport::new(0);
        stage.push_layer(layer("FROM"));
        stage.push_layer(layer("RUN"));
        stage.push_layer(layer("ENV"));
        stage.push_layer(layer("ARG"));
        stage.push_layer(layer("COPY"));

        let numbers: Vec<usize> = stage.layers.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(stage.fs_layers, 2);
        assert_eq!(stage.metadata_layers, 1);
        assert_eq!(stage.build_args, 1);
    }

    #[test]
    fn test_push_global_numbers() {
        let mut report = Report::new("Dockerfile");
        report.push_global(layer("ARG"));
        report.push_global(layer("ARG"));
        assert_eq!(report.global[1].number, 2);
        assert_eq!(report.layer_count(), 2);
    }

    #[test]
    fn test_display_name() {
        let mut info = StageInfo {
            index: 1,
            name: String::new(),
            base: "scratch".to_string(),
        };
        assert_eq!(info.display_name(), "Stage 1");
        info.name = "builder".to_string();
        assert_eq!(info.display_name(), "Stage 1 (builder)");
    }

    #[test]
    fn test_find_layer() {
        let mut stage = StageReport::new(0);
        stage.push_layer(layer("FROM"));
        stage.push_layer(layer("CMD"));
        assert_eq!(stage.find_layer("CMD").map(|l| l.number), Some(2));
        assert!(stage.find_layer("RUN").is_none());
    }
}
