//! Configuration types deserialized from `weave.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `weave.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaveConfig {
    /// Rendering settings for generated artifacts.
    #[serde(default)]
    pub emit: EmitConfig,
    /// Merge policy settings.
    #[serde(default)]
    pub merge: MergeConfig,
    /// Scheduling settings for the incremental driver.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// How merged targets are rendered into text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Appended to `<namespace>.<name>` to form the artifact id.
    pub artifact_suffix: String,
    /// First line of every artifact. Empty disables the header.
    pub header: String,
    /// Strip the shared indentation of multi-line members and re-indent them
    /// to the block. Off by default, because it rewrites multi-line literals.
    pub reindent_members: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            artifact_suffix: ".g.cs".to_string(),
            header: "// <auto-generated/>".to_string(),
            reindent_members: false,
        }
    }
}

/// Merge policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Report `DuplicateMemberName` when two composed mixins contribute a
    /// member with the same host-supplied name. Members are still appended.
    pub detect_duplicate_members: bool,
}

/// Scheduling of per-target work.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Process targets in parallel.
    pub parallel: bool,
    /// Worker threads for a dedicated pool; `0` uses the global rayon pool.
    pub jobs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}
