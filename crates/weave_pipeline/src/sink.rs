//! Where rendered artifacts go.

use std::collections::BTreeMap;

use weave_emit::ArtifactId;

/// Receives every artifact of a completed run, in target order.
///
/// The driver emits the full artifact set on each completed run, including
/// artifacts served from cache, so a host may treat each run's output as the
/// complete set.
pub trait ArtifactSink {
    /// Accepts one artifact.
    fn emit(&mut self, id: &ArtifactId, text: &str);
}

/// Keeps emitted artifacts in memory, keyed by id.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: BTreeMap<ArtifactId, String>,
    emitted: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the artifact with the given id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.artifacts.get(id).map(String::as_str)
    }

    /// Every artifact ever emitted, sorted by id. Later emissions replace
    /// earlier ones with the same id.
    pub fn artifacts(&self) -> &BTreeMap<ArtifactId, String> {
        &self.artifacts
    }

    /// Number of `emit` calls received.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.artifacts.clear();
        self.emitted = 0;
    }
}

impl ArtifactSink for MemorySink {
    fn emit(&mut self, id: &ArtifactId, text: &str) {
        self.emitted += 1;
        self.artifacts.insert(id.clone(), text.to_string());
    }
}
