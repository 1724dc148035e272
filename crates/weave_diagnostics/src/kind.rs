//! The taxonomy of problems the composer can report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::code::{Category, DiagnosticCode};
use crate::severity::Severity;

/// Requested mixin identity could not be found.
pub const E101: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// Same mixin requested more than once on one target.
pub const W102: DiagnosticCode = DiagnosticCode::new(Category::Warning, 102);

/// Two targets would emit into the same artifact slot.
pub const E103: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);

/// A marked declaration could not be projected into a snapshot.
pub const W104: DiagnosticCode = DiagnosticCode::new(Category::Warning, 104);

/// Two composed mixins contribute a member with the same name.
pub const W105: DiagnosticCode = DiagnosticCode::new(Category::Warning, 105);

/// What went wrong, independent of wording.
///
/// None of these is fatal: each is recovered locally and the run continues.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A mixin reference matched no known mixin source. The target is still
    /// emitted with the mixins that did resolve.
    UnresolvedMixin,
    /// A target listed the same mixin twice. Later occurrences are ignored.
    DuplicateMixinReference,
    /// A second target mapped to an artifact id already taken. It is dropped.
    DuplicateArtifactId,
    /// A marked declaration was skipped because it could not be projected.
    MalformedDeclaration,
    /// Opt-in: composed mixins contribute members with the same name.
    DuplicateMemberName,
}

impl DiagnosticKind {
    /// Returns the stable code for this kind.
    pub fn code(self) -> DiagnosticCode {
        match self {
            DiagnosticKind::UnresolvedMixin => E101,
            DiagnosticKind::DuplicateMixinReference => W102,
            DiagnosticKind::DuplicateArtifactId => E103,
            DiagnosticKind::MalformedDeclaration => W104,
            DiagnosticKind::DuplicateMemberName => W105,
        }
    }

    /// Returns the default severity for this kind.
    pub fn severity(self) -> Severity {
        match self.code().category {
            Category::Error => Severity::Error,
            Category::Warning => Severity::Warning,
        }
    }

    /// Returns the kind's name as it appears in rendered output.
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticKind::UnresolvedMixin => "UnresolvedMixin",
            DiagnosticKind::DuplicateMixinReference => "DuplicateMixinReference",
            DiagnosticKind::DuplicateArtifactId => "DuplicateArtifactId",
            DiagnosticKind::MalformedDeclaration => "MalformedDeclaration",
            DiagnosticKind::DuplicateMemberName => "DuplicateMemberName",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
