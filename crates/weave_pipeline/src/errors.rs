//! Diagnostics raised by the driver itself.

use weave_diagnostics::{Diagnostic, DiagnosticKind};
use weave_emit::ArtifactId;
use weave_snapshot::ExtractError;

/// A marked declaration that was skipped.
pub fn warn_malformed(err: &ExtractError) -> Diagnostic {
    let diag = Diagnostic::new(DiagnosticKind::MalformedDeclaration, err.to_string())
        .with_note("the declaration was skipped");
    match err.declaration_name() {
        Some(name) => diag.for_target(name),
        None => diag,
    }
}

/// A target whose artifact id was already claimed by an earlier target.
pub fn error_duplicate_artifact(target: &str, id: &ArtifactId, first: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::DuplicateArtifactId,
        format!("artifact `{id}` is already generated for `{first}`"),
    )
    .for_target(target)
    .with_note("this target was not emitted")
}
