//! Diagnostic constructors for resolution and merge problems.
//!
//! Every constructor takes the qualified name of the target being composed,
//! which becomes the diagnostic's `target`.

use weave_diagnostics::{Diagnostic, DiagnosticKind};

/// A reference to a type that is not a known mixin source.
pub fn error_unresolved_mixin(target: &str, mixin: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::UnresolvedMixin,
        format!("cannot find mixin `{mixin}`"),
    )
    .for_target(target)
    .with_help("mark the referenced type with the mixin attribute")
}

/// A reference the host could not bind to any type.
///
/// `position` is the zero-based index into the target's mixin references.
pub fn error_unbound_mixin(target: &str, position: usize) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::UnresolvedMixin,
        format!("mixin argument {} of `{target}` does not name a type", position + 1),
    )
    .for_target(target)
}

/// The same mixin listed more than once on one target.
pub fn warn_duplicate_mixin(target: &str, mixin: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::DuplicateMixinReference,
        format!("mixin `{mixin}` is listed more than once"),
    )
    .for_target(target)
    .with_note("only the first occurrence is composed")
}

/// Two composed mixins contribute a member with the same name.
pub fn warn_duplicate_member(target: &str, member: &str, first: &str, second: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::DuplicateMemberName,
        format!("member `{member}` is contributed by both `{first}` and `{second}`"),
    )
    .for_target(target)
    .with_note("both members are emitted; the host compiler will reject the duplicate")
}
