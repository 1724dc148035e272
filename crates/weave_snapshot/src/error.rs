//! Reasons a marked declaration cannot be projected into a snapshot.

/// A declaration carried a mixin marker but could not be snapshotted.
///
/// The driver skips such declarations and reports them as
/// `MalformedDeclaration`; they never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The declaration has no usable identifier.
    #[error("marked declaration has no name")]
    MissingName,

    /// The host did not bind the mixin declaration to a symbol.
    #[error("mixin `{name}` has no resolved symbol")]
    MissingIdentity {
        /// Name of the declaration.
        name: String,
    },

    /// A namespace segment is empty (e.g. `A..B`).
    #[error("`{name}` is declared in malformed namespace `{namespace}`")]
    MalformedNamespace {
        /// Name of the declaration.
        name: String,
        /// The namespace as reported by the host.
        namespace: String,
    },
}

impl ExtractError {
    /// Name of the offending declaration, when it has one.
    pub fn declaration_name(&self) -> Option<&str> {
        match self {
            ExtractError::MissingName => None,
            ExtractError::MissingIdentity { name }
            | ExtractError::MalformedNamespace { name, .. } => Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_namespace() {
        let err = ExtractError::MalformedNamespace {
            name: "Widget".to_string(),
            namespace: "App..Ui".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`Widget` is declared in malformed namespace `App..Ui`"
        );
        assert_eq!(err.declaration_name(), Some("Widget"));
    }

    #[test]
    fn missing_name_has_no_declaration_name() {
        assert!(ExtractError::MissingName.declaration_name().is_none());
    }
}
