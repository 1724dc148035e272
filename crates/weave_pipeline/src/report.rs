//! Summary of one driver run.

use serde::Serialize;
use weave_diagnostics::{Diagnostic, DiagnosticRenderer};
use weave_emit::ArtifactId;

use crate::cache::StageStats;
use crate::changes::ChangeSet;

/// Whether an artifact's text was rendered during this run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    /// Rendered this run.
    Fresh,
    /// Served from the render cache.
    Cached,
}

/// One artifact handed to the sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmittedArtifact {
    /// The artifact's id.
    pub id: ArtifactId,
    /// Whether its text was rendered this run.
    pub status: ArtifactStatus,
}

/// Counts gathered during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Mixin sources extracted.
    pub sources: usize,
    /// Mixin targets extracted.
    pub targets: usize,
    /// Marked declarations skipped as malformed.
    pub malformed: usize,
    /// Resolve-stage cache counters.
    pub resolve: StageStats,
    /// Merge-stage cache counters.
    pub merge: StageStats,
    /// Render-stage cache counters.
    pub render: StageStats,
}

/// What one run did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Stage counters.
    pub stats: PipelineStats,
    /// Snapshot differences from the previous completed run.
    pub changes: ChangeSet,
    /// Artifacts emitted, in target order. Empty when cancelled.
    pub artifacts: Vec<EmittedArtifact>,
    /// Every diagnostic reported, in report order. Empty when cancelled.
    pub diagnostics: Vec<Diagnostic>,
    /// The run stopped early and emitted nothing.
    pub cancelled: bool,
}

impl RunReport {
    /// Number of artifacts rendered this run.
    pub fn fresh_count(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.status == ArtifactStatus::Fresh)
            .count()
    }

    /// Status of the artifact with the given id, if it was emitted.
    pub fn status_of(&self, id: &str) -> Option<ArtifactStatus> {
        self.artifacts
            .iter()
            .find(|a| a.id.as_str() == id)
            .map(|a| a.status)
    }

    /// Whether any error-severity diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// This run's diagnostics formatted for display, in report order.
    pub fn render_diagnostics(&self, renderer: &dyn DiagnosticRenderer) -> String {
        renderer.render_all(&self.diagnostics)
    }
}
