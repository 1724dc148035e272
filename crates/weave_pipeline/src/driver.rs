//! The incremental driver.
//!
//! A run extracts every host declaration, diffs the snapshots against the
//! previous completed run, then resolves, merges and renders each target.
//! Those three stages are memoized on input equality, so a target whose
//! inputs are unchanged is served entirely from cache. Artifacts are handed
//! to the sink only once every target has been processed.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use weave_common::{ContentHash, InternalError, Interner, WeaveResult};
use weave_compose::{merge_resolved, MergeResult, MixinUniverse, ResolveInput, ResolvedTarget};
use weave_config::WeaveConfig;
use weave_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use weave_emit::{render, Artifact, ArtifactId};
use weave_snapshot::{try_extract, DeclarationNode, MixinTarget, Snapshot};

use crate::cache::StageCache;
use crate::cancel::CancellationToken;
use crate::changes::{detect_changes, DeclKey};
use crate::errors;
use crate::report::{ArtifactStatus, EmittedArtifact, PipelineStats, RunReport};
use crate::sink::ArtifactSink;

/// Per-target output of the memoized stages.
struct TargetOutcome {
    target: Arc<MixinTarget>,
    merged: Arc<MergeResult>,
    artifact: Arc<Artifact>,
    status: ArtifactStatus,
}

/// Runs the pipeline and owns the state carried between runs.
///
/// That state is the three memo tables and the previous run's snapshot
/// fingerprints. All of it is discardable with [`reset`](Self::reset). Symbols
/// must come from the same [`Interner`] on every run; reset after switching.
pub struct Driver {
    config: WeaveConfig,
    pool: Option<rayon::ThreadPool>,
    resolve_cache: StageCache<ResolveInput, Arc<ResolvedTarget>>,
    merge_cache: StageCache<Arc<ResolvedTarget>, Arc<MergeResult>>,
    render_cache: StageCache<Arc<MergeResult>, Arc<Artifact>>,
    previous: HashMap<DeclKey, ContentHash>,
    runs: u64,
}

impl Driver {
    /// Creates a driver with empty caches.
    ///
    /// Fails only when `pipeline.jobs` asks for a dedicated thread pool that
    /// cannot be started.
    pub fn new(config: WeaveConfig) -> WeaveResult<Self> {
        let pool = if config.pipeline.parallel && config.pipeline.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.pipeline.jobs)
                .thread_name(|i| format!("weave-worker-{i}"))
                .build()
                .map_err(|e| InternalError::new(format!("failed to start worker pool: {e}")))?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            config,
            pool,
            resolve_cache: StageCache::new("resolve"),
            merge_cache: StageCache::new("merge"),
            render_cache: StageCache::new("render"),
            previous: HashMap::new(),
            runs: 0,
        })
    }

    /// The configuration this driver was built with.
    pub fn config(&self) -> &WeaveConfig {
        &self.config
    }

    /// Number of completed runs since creation or the last reset.
    pub fn completed_runs(&self) -> u64 {
        self.runs
    }

    /// Entries retained across all memo tables.
    pub fn cached_entries(&self) -> usize {
        self.resolve_cache.len() + self.merge_cache.len() + self.render_cache.len()
    }

    /// Discards every memo table and the previous snapshot set.
    pub fn reset(&mut self) {
        self.resolve_cache.clear();
        self.merge_cache.clear();
        self.render_cache.clear();
        self.previous.clear();
        self.runs = 0;
        tracing::debug!("driver state reset");
    }

    /// Runs the pipeline over `nodes` to completion.
    pub fn run<N>(
        &mut self,
        nodes: &[N],
        interner: &Interner,
        artifacts: &mut dyn ArtifactSink,
        diagnostics: &DiagnosticSink,
    ) -> RunReport
    where
        N: DeclarationNode + Sync,
    {
        self.run_with_cancel(nodes, interner, artifacts, diagnostics, &CancellationToken::new())
    }

    /// Runs the pipeline over `nodes`, stopping between targets once `cancel`
    /// is triggered.
    ///
    /// A cancelled run emits no artifacts and no diagnostics, keeps the memo
    /// tables, and leaves the previous snapshot set as it was.
    #[tracing::instrument(level = "debug", skip_all, fields(run = self.runs + 1, nodes = nodes.len()))]
    pub fn run_with_cancel<N>(
        &mut self,
        nodes: &[N],
        interner: &Interner,
        artifacts: &mut dyn ArtifactSink,
        diagnostics: &DiagnosticSink,
        cancel: &CancellationToken,
    ) -> RunReport
    where
        N: DeclarationNode + Sync,
    {
        self.resolve_cache.begin_run();
        self.merge_cache.begin_run();
        self.render_cache.begin_run();

        let extracted = self.map_ordered(nodes, |node| try_extract(node));

        let mut report_diags = Vec::new();
        let mut sources = Vec::new();
        let mut targets = Vec::new();
        let mut fingerprints = HashMap::new();
        let mut stats = PipelineStats::default();
        for result in extracted {
            let snapshots = match result {
                Ok(snapshots) => snapshots,
                Err(err) => {
                    tracing::debug!(%err, "skipping malformed declaration");
                    stats.malformed += 1;
                    report_diags.push(errors::warn_malformed(&err));
                    continue;
                }
            };
            for snapshot in snapshots {
                let (key, hash) = DeclKey::of(&snapshot);
                fingerprints.entry(key).or_insert(hash);
                match snapshot {
                    Snapshot::Source(source) => sources.push(Arc::new(source)),
                    Snapshot::Target(target) => targets.push(Arc::new(target)),
                }
            }
        }
        stats.sources = sources.len();
        stats.targets = targets.len();

        let changes = detect_changes(&fingerprints, &self.previous);
        tracing::debug!(
            new = changes.new.len(),
            modified = changes.modified.len(),
            removed = changes.removed.len(),
            unchanged = changes.unchanged.len(),
            "snapshot changes"
        );

        let universe = MixinUniverse::from_sources(sources);
        let outcomes = self.map_ordered(&targets, |target| {
            if cancel.is_cancelled() {
                return None;
            }
            Some(self.compose(target, &universe, interner))
        });

        stats.resolve = self.resolve_cache.stats();
        stats.merge = self.merge_cache.stats();
        stats.render = self.render_cache.stats();

        if cancel.is_cancelled() || outcomes.iter().any(Option::is_none) {
            self.resolve_cache.abandon_run();
            self.merge_cache.abandon_run();
            self.render_cache.abandon_run();
            tracing::debug!("run cancelled, nothing emitted");
            return RunReport {
                stats,
                changes,
                cancelled: true,
                ..RunReport::default()
            };
        }

        let mut claimed: HashMap<ArtifactId, String> = HashMap::new();
        let mut duplicate_diags = Vec::new();
        let mut kept = Vec::new();
        for outcome in outcomes.into_iter().flatten() {
            report_diags.extend(outcome.merged.diagnostics().iter().cloned());
            let name = outcome.target.qualified_name();
            if let Some(first) = claimed.get(&outcome.artifact.id) {
                tracing::warn!(
                    artifact = %outcome.artifact.id,
                    decl = %name,
                    "duplicate artifact id"
                );
                duplicate_diags.push(errors::error_duplicate_artifact(
                    &name,
                    &outcome.artifact.id,
                    first,
                ));
                continue;
            }
            claimed.insert(outcome.artifact.id.clone(), name);
            kept.push(outcome);
        }
        report_diags.append(&mut duplicate_diags);

        let mut emitted = Vec::with_capacity(kept.len());
        for outcome in &kept {
            artifacts.emit(&outcome.artifact.id, &outcome.artifact.text);
            emitted.push(EmittedArtifact {
                id: outcome.artifact.id.clone(),
                status: outcome.status,
            });
        }
        if tracing::enabled!(tracing::Level::DEBUG) {
            let renderer = TerminalRenderer::new(false);
            for diag in &report_diags {
                tracing::debug!(code = %diag.code, "{}", renderer.render(diag).trim_end());
            }
        }
        diagnostics.extend(report_diags.iter().cloned());

        self.previous = fingerprints;
        self.runs += 1;

        let report = RunReport {
            stats,
            changes,
            artifacts: emitted,
            diagnostics: report_diags,
            cancelled: false,
        };
        tracing::debug!(
            artifacts = report.artifacts.len(),
            fresh = report.fresh_count(),
            diagnostics = report.diagnostics.len(),
            resolve_hits = stats.resolve.hits,
            merge_hits = stats.merge.hits,
            render_hits = stats.render.hits,
            "run complete"
        );
        report
    }

    /// Resolves, merges and renders one target through the memo tables.
    fn compose(
        &self,
        target: &Arc<MixinTarget>,
        universe: &MixinUniverse,
        interner: &Interner,
    ) -> TargetOutcome {
        let input = ResolveInput::project(target, universe);
        let (resolved, _) = self
            .resolve_cache
            .get_or_compute(input, |input| Arc::new(input.resolve(interner)));
        let (merged, _) = self
            .merge_cache
            .get_or_compute(resolved, |resolved| {
                Arc::new(merge_resolved(resolved, &self.config.merge))
            });
        let (artifact, hit) = self
            .render_cache
            .get_or_compute(Arc::clone(&merged), |merged| {
                Arc::new(render(merged, &self.config.emit))
            });
        tracing::trace!(decl = %target.qualified_name(), cached = hit, "target composed");

        TargetOutcome {
            target: Arc::clone(target),
            merged,
            artifact,
            status: if hit {
                ArtifactStatus::Cached
            } else {
                ArtifactStatus::Fresh
            },
        }
    }

    /// Maps `items` in order, in parallel when configured.
    fn map_ordered<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if !self.config.pipeline.parallel {
            return items.iter().map(f).collect();
        }
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.par_iter().map(&f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use weave_config::PipelineConfig;
    use weave_snapshot::DeclNode;

    fn sequential() -> WeaveConfig {
        WeaveConfig {
            pipeline: PipelineConfig {
                parallel: false,
                jobs: 0,
            },
            ..WeaveConfig::default()
        }
    }

    fn scene(interner: &Interner) -> Vec<DeclNode> {
        vec![
            DeclNode::new("Shape")
                .in_namespace("Geometry")
                .with_symbol(interner.symbol("Geometry.Shape"))
                .mixin_source()
                .with_member("public int Sides;"),
            DeclNode::new("Circle")
                .in_namespace("Geometry")
                .with_modifiers(["public"])
                .add_mixins([Some(interner.symbol("Geometry.Shape"))]),
        ]
    }

    #[test]
    fn first_run_renders_everything() {
        let interner = Interner::new();
        let mut driver = Driver::new(sequential()).unwrap();
        let mut sink = MemorySink::new();
        let diags = DiagnosticSink::new();

        let report = driver.run(&scene(&interner), &interner, &mut sink, &diags);
        assert!(!report.cancelled);
        assert_eq!(report.stats.sources, 1);
        assert_eq!(report.stats.targets, 1);
        assert_eq!(report.stats.render.misses, 1);
        assert_eq!(report.status_of("Geometry.Circle.g.cs"), Some(ArtifactStatus::Fresh));
        assert!(sink.get("Geometry.Circle.g.cs").is_some());
        assert_eq!(driver.completed_runs(), 1);
    }

    #[test]
    fn unchanged_rerun_hits_every_stage() {
        let interner = Interner::new();
        let mut driver = Driver::new(sequential()).unwrap();
        let mut sink = MemorySink::new();
        let diags = DiagnosticSink::new();

        driver.run(&scene(&interner), &interner, &mut sink, &diags);
        let report = driver.run(&scene(&interner), &interner, &mut sink, &diags);
        assert_eq!(report.stats.resolve.hits, 1);
        assert_eq!(report.stats.merge.hits, 1);
        assert_eq!(report.stats.render.hits, 1);
        assert_eq!(report.stats.render.misses, 0);
        assert!(report.changes.is_empty());
        assert_eq!(report.status_of("Geometry.Circle.g.cs"), Some(ArtifactStatus::Cached));
    }

    #[test]
    fn cancelled_run_emits_nothing() {
        let interner = Interner::new();
        let mut driver = Driver::new(sequential()).unwrap();
        let mut sink = MemorySink::new();
        let diags = DiagnosticSink::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report =
            driver.run_with_cancel(&scene(&interner), &interner, &mut sink, &diags, &cancel);
        assert!(report.cancelled);
        assert!(report.artifacts.is_empty());
        assert_eq!(sink.emitted(), 0);
        assert_eq!(driver.completed_runs(), 0);
    }

    #[test]
    fn reset_discards_caches() {
        let interner = Interner::new();
        let mut driver = Driver::new(sequential()).unwrap();
        let mut sink = MemorySink::new();
        let diags = DiagnosticSink::new();

        driver.run(&scene(&interner), &interner, &mut sink, &diags);
        assert!(driver.cached_entries() > 0);
        driver.reset();
        assert_eq!(driver.cached_entries(), 0);

        let report = driver.run(&scene(&interner), &interner, &mut sink, &diags);
        assert_eq!(report.stats.render.misses, 1);
        assert_eq!(report.changes.new.len(), 2);
    }

    #[test]
    fn dedicated_pool_runs() {
        let interner = Interner::new();
        let config = WeaveConfig {
            pipeline: PipelineConfig {
                parallel: true,
                jobs: 2,
            },
            ..WeaveConfig::default()
        };
        let mut driver = Driver::new(config).unwrap();
        let mut sink = MemorySink::new();
        let report = driver.run(&scene(&interner), &interner, &mut sink, &DiagnosticSink::new());
        assert_eq!(report.artifacts.len(), 1);
    }

    #[test]
    fn heterogeneous_hosts_can_pass_trait_objects() {
        let interner = Interner::new();
        let owned = scene(&interner);
        let nodes: Vec<&(dyn DeclarationNode + Sync)> =
            owned.iter().map(|n| n as &(dyn DeclarationNode + Sync)).collect();
        let mut driver = Driver::new(sequential()).unwrap();
        let mut sink = MemorySink::new();
        let report = driver.run(&nodes, &interner, &mut sink, &DiagnosticSink::new());
        assert_eq!(report.artifacts.len(), 1);
    }
}
