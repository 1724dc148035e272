//! Conformance test helpers for the Weave mixin composer.
//!
//! [`Host`] plays the role of a compiler host: it owns the interner, builds
//! declaration nodes bound to qualified symbols, and drives runs through a
//! [`Driver`], collecting everything a run produced into a [`RunResult`].

#![warn(missing_docs)]

use weave_common::{Interner, SymbolRef};
use weave_config::{load_config_from_str, WeaveConfig};
use weave_diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity};
use weave_pipeline::{CancellationToken, Driver, MemorySink, RunReport};
use weave_snapshot::DeclNode;

/// Everything one run produced.
pub struct RunResult {
    /// The driver's report.
    pub report: RunReport,
    /// Artifacts handed to the sink this run.
    pub sink: MemorySink,
    /// All diagnostics pushed into the sink this run.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl RunResult {
    /// Text of the artifact with the given id.
    pub fn artifact(&self, id: &str) -> Option<&str> {
        self.sink.get(id)
    }

    /// Ids of every artifact emitted, sorted.
    pub fn artifact_ids(&self) -> Vec<String> {
        self.sink
            .artifacts()
            .keys()
            .map(|id| id.to_string())
            .collect()
    }

    /// Diagnostics of the given kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }
}

/// A simulated compiler host.
pub struct Host {
    interner: Interner,
    driver: Driver,
}

impl Host {
    /// A host with the default configuration, processing targets sequentially.
    pub fn new() -> Self {
        Self::with_config_str("[pipeline]\nparallel = false\n")
    }

    /// A host configured from `weave.toml` text.
    pub fn with_config_str(toml: &str) -> Self {
        let config = load_config_from_str(toml).expect("fixture config is valid");
        Self::with_config(config)
    }

    /// A host with an explicit configuration.
    pub fn with_config(config: WeaveConfig) -> Self {
        Self {
            interner: Interner::new(),
            driver: Driver::new(config).expect("driver starts"),
        }
    }

    /// The host's interner.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// The driver.
    pub fn driver_mut(&mut self) -> &mut Driver {
        &mut self.driver
    }

    /// The symbol for a fully-qualified type name.
    pub fn sym(&self, qualified: &str) -> SymbolRef {
        self.interner.symbol(qualified)
    }

    /// A mixin source bound to `namespace.name`.
    pub fn mixin(&self, namespace: &str, name: &str) -> DeclNode {
        let node = DeclNode::new(name)
            .with_symbol(self.sym(&qualify(namespace, name)))
            .mixin_source();
        if namespace.is_empty() {
            node
        } else {
            node.in_namespace(namespace)
        }
    }

    /// A public target requesting the given qualified mixins in order.
    pub fn target(&self, namespace: &str, name: &str, mixins: &[&str]) -> DeclNode {
        let node = DeclNode::new(name)
            .with_modifiers(["public"])
            .add_mixins(mixins.iter().map(|m| Some(self.sym(m))));
        if namespace.is_empty() {
            node
        } else {
            node.in_namespace(namespace)
        }
    }

    /// Runs the driver over `nodes`.
    pub fn run(&mut self, nodes: &[DeclNode]) -> RunResult {
        self.run_with_cancel(nodes, &CancellationToken::new())
    }

    /// Runs the driver over `nodes` with a cancellation token.
    pub fn run_with_cancel(&mut self, nodes: &[DeclNode], cancel: &CancellationToken) -> RunResult {
        let mut sink = MemorySink::new();
        let diags = DiagnosticSink::new();
        let report = self
            .driver
            .run_with_cancel(nodes, &self.interner, &mut sink, &diags, cancel);

        let diagnostics = diags.take_all();
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        RunResult {
            report,
            sink,
            diagnostics,
            error_count,
            warning_count,
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
