//! Structured diagnostic records.

use crate::code::DiagnosticCode;
use crate::kind::DiagnosticKind;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic: `{kind, target, message}` plus severity and code.
///
/// Diagnostics are plain values. They are stored inside merge results, which
/// are memoization keys, so they are `Eq + Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The stable code identifying the kind.
    pub code: DiagnosticCode,
    /// The kind of problem.
    pub kind: DiagnosticKind,
    /// Qualified name of the declaration the diagnostic concerns, if any.
    pub target: Option<String>,
    /// The main diagnostic message.
    pub message: String,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic whose severity and code follow from `kind`.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            code: kind.code(),
            kind,
            target: None,
            message: message.into(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Attaches the qualified name of the declaration this diagnostic concerns.
    pub fn for_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Overrides the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
