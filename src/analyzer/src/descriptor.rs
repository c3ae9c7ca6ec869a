//! Static instruction descriptors.
//!
//! Each known Dockerfile keyword maps to the effect it has on the image,
//! a short explanation and a hint about what invalidates its build cache.
//! Keywords missing from the table are treated as metadata.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// What an instruction does to the image being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Starts a new stage from a base image.
    #[serde(rename = "stage start")]
    StageStart,
    /// Adds or mutates files and commits a new layer.
    #[serde(rename = "filesystem layer")]
    Filesystem,
    /// Changes image configuration only.
    #[serde(rename = "metadata")]
    Metadata,
    /// Build-time input that does not persist in the image.
    #[serde(rename = "build arg")]
    BuildArg,
}

impl Effect {
    /// Label used in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StageStart => "stage start",
            Self::Filesystem => "filesystem layer",
            Self::Metadata => "metadata",
            Self::BuildArg => "build arg",
        }
    }

    /// One-sentence legend entry.
    pub fn legend(&self) -> &'static str {
        match self {
            Self::StageStart => "Pulls or resets a stage.",
            Self::Filesystem => "Adds or mutates files, affecting image size and cache.",
            Self::Metadata => "Adjusts container config without changing files.",
            Self::BuildArg => "Build-only inputs that do not persist in the image.",
        }
    }

    /// All effects in legend order.
    pub const ALL: [Effect; 4] = [
        Effect::StageStart,
        Effect::Filesystem,
        Effect::Metadata,
        Effect::BuildArg,
    ];
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Static description of one instruction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub effect: Effect,
    pub explanation: &'static str,
    pub cache_hint: &'static str,
}

const FALLBACK: Descriptor = Descriptor {
    effect: Effect::Metadata,
    explanation: "Recorded as metadata. It influences how containers start but does not add filesystem content.",
    cache_hint: "Cache key ties to the literal instruction, so changing text invalidates the layer.",
};

static DESCRIPTORS: LazyLock<HashMap<&'static str, Descriptor>> = LazyLock::new(|| {
    use Effect::*;

    let entries: [(&str, Effect, &str, &str); 18] = [
        (
            "FROM",
            StageStart,
            "Starts a stage and pulls the referenced base image. Any cache from previous stages is discarded.",
            "Invalidates when the base image digest or flags like --platform change.",
        ),
        (
            "RUN",
            Filesystem,
            "Executes a shell command inside an intermediate container and commits the result as a new, immutable layer.",
            "Cache key is the command text plus every file the command reads. Changing any of them busts the cache.",
        ),
        (
            "COPY",
            Filesystem,
            "Copies files into the image and creates a new layer with their contents.",
            "Any change in the source files or flags invalidates this layer's cache entry.",
        ),
        (
            "ADD",
            Filesystem,
            "Behaves like COPY but also accepts remote URLs and auto-extracts tar archives, all of which produce new layers.",
            "Cache depends on the archive/URL content as well as the instruction text.",
        ),
        (
            "CMD",
            Metadata,
            "Sets the default command for containers created from the image. No filesystem changes occur.",
            "Cache is tied to the instruction text only.",
        ),
        (
            "ENTRYPOINT",
            Metadata,
            "Defines the executable that always runs when a container starts.",
            "Cache is tied to the instruction text only.",
        ),
        (
            "ENV",
            Metadata,
            "Persists environment variables into image metadata for future instructions and containers.",
            "Any variable value change invalidates the cache for this step and later steps.",
        ),
        (
            "ARG",
            BuildArg,
            "Defines build-time arguments. The value can influence cache keys but does not end up in the final image runtime environment.",
            "Changing build args invalidates the layer that consumes them.",
        ),
        (
            "WORKDIR",
            Metadata,
            "Sets the working directory for subsequent instructions, recorded as metadata.",
            "Cache busts only when the path changes.",
        ),
        (
            "USER",
            Metadata,
            "Configures the user/group used for following instructions and containers.",
            "Cache busts when the user specification changes.",
        ),
        (
            "LABEL",
            Metadata,
            "Adds metadata key/value pairs to the image manifest without touching the filesystem.",
            "Cache invalidates when a label changes.",
        ),
        (
            "EXPOSE",
            Metadata,
            "Documents which ports containers are expected to listen on. Pure metadata.",
            "Cache invalidates when the exposed ports change.",
        ),
        (
            "VOLUME",
            Metadata,
            "Declares mount points that become anonymous volumes at runtime.",
            "Cache depends only on the instruction text.",
        ),
        (
            "HEALTHCHECK",
            Metadata,
            "Stores a command for Docker to probe container health. No filesystem changes.",
            "Cache invalidates when the command or interval flags change.",
        ),
        (
            "STOPSIGNAL",
            Metadata,
            "Configures which signal Docker sends to stop the container.",
            "Cache depends on the instruction text.",
        ),
        (
            "SHELL",
            Metadata,
            "Overrides the default shell that RUN and similar instructions use.",
            "Cache invalidates when the shell definition changes.",
        ),
        (
            "ONBUILD",
            Metadata,
            "Registers a trigger that fires when the current image is used as a base in another Dockerfile.",
            "Cache ties to the trigger content.",
        ),
        (
            "MAINTAINER",
            Metadata,
            "Deprecated metadata about the author. Included here for completeness.",
            "Cache invalidates when the value changes.",
        ),
    ];

    entries
        .into_iter()
        .map(|(keyword, effect, explanation, cache_hint)| {
            (
                keyword,
                Descriptor {
                    effect,
                    explanation,
                    cache_hint,
                },
            )
        })
        .collect()
});

/// Look up the descriptor for an uppercased keyword.
pub fn descriptor_for(keyword: &str) -> Descriptor {
    DESCRIPTORS.get(keyword).copied().unwrap_or(FALLBACK)
}

/// Whether the keyword has its own table entry.
pub fn is_known(keyword: &str) -> bool {
    DESCRIPTORS.contains_key(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_labels() {
        assert_eq!(Effect::StageStart.to_string(), "stage start");
        assert_eq!(Effect::Filesystem.to_string(), "filesystem layer");
        assert_eq!(Effect::Metadata.to_string(), "metadata");
        assert_eq!(Effect::BuildArg.to_string(), "build arg");
    }

    #[test]
    fn test_effect_display_pads() {
        assert_eq!(format!("{:<12}|", Effect::Metadata), "metadata    |");
    }

    #[test]
    fn test_effect_serializes_as_label() {
        for effect in Effect::ALL {
            let json = serde_json::to_string(&effect).unwrap();
            assert_eq!(json, format!("\"{}\"", effect.label()));
        }
    }

    #[test]
    fn test_descriptor_categories() {
        assert_eq!(descriptor_for("FROM").effect, Effect::StageStart);
        for keyword in ["RUN", "COPY", "ADD"] {
            assert_eq!(descriptor_for(keyword).effect, Effect::Filesystem, "{keyword}");
        }
        for keyword in [
            "CMD",
            "ENTRYPOINT",
            "ENV",
            "WORKDIR",
            "USER",
            "LABEL",
            "EXPOSE",
            "VOLUME",
            "HEALTHCHECK",
            "STOPSIGNAL",
            "SHELL",
            "ONBUILD",
            "MAINTAINER",
        ] {
            assert_eq!(descriptor_for(keyword).effect, Effect::Metadata, "{keyword}");
            assert!(is_known(keyword));
        }
        assert_eq!(descriptor_for("ARG").effect, Effect::BuildArg);
    }

    #[test]
    fn test_descriptor_unknown_falls_back() {
        let desc = descriptor_for("CHECKPOINT");
        assert_eq!(desc, FALLBACK);
        assert_eq!(desc.effect, Effect::Metadata);
        assert!(!is_known("CHECKPOINT"));
    }

    #[test]
    fn test_descriptor_lookup_is_case_sensitive() {
        assert!(!is_known("run"));
        assert_eq!(descriptor_for("run"), FALLBACK);
    }

    #[test]
    fn test_descriptors_have_text() {
        for (keyword, desc) in DESCRIPTORS.iter() {
            assert!(!desc.explanation.is_empty(), "{keyword}");
            assert!(!desc.cache_hint.is_empty(), "{keyword}");
        }
        assert_eq!(DESCRIPTORS.len(), 18);
    }
}
