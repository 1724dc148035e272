//! Common result and error types for Weave.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error (a bug or an environment
/// failure such as a thread pool that cannot start), never a problem with the
/// user's declarations. Those are reported as diagnostics and the operation
/// still returns `Ok`.
pub type WeaveResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug or environment failure in Weave.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
