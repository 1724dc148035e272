//! Diagnostic records, severity management, and text/JSON rendering.
//!
//! Every recoverable problem found while composing mixins is reported as a
//! structured [`Diagnostic`] carrying its [`DiagnosticKind`], the declaration it
//! concerns, and a message. The thread-safe [`DiagnosticSink`] is the host's
//! diagnostic channel, and [`DiagnosticRenderer`] implementations format
//! records for a terminal or as JSON lines.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod kind;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use kind::DiagnosticKind;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
