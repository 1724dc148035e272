//! Incremental driver for the Weave mixin composer.
//!
//! [`Driver`] runs extraction, resolution, merging and rendering over a host's
//! declarations, memoizing each per-target stage on input equality so that
//! only targets whose inputs changed are recomputed. A [`RunReport`] describes
//! what each run did.

#![warn(missing_docs)]

pub mod cache;
pub mod cancel;
pub mod changes;
pub mod driver;
pub mod errors;
pub mod report;
pub mod sink;

pub use cache::{StageCache, StageStats};
pub use cancel::CancellationToken;
pub use changes::{ChangeSet, DeclKey, DeclKind};
pub use driver::Driver;
pub use report::{ArtifactStatus, EmittedArtifact, PipelineStats, RunReport};
pub use sink::{ArtifactSink, MemorySink};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and nothing after the first call.
/// Library code never calls this; hosts and tests opt in.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
