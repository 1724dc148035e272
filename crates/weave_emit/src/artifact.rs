//! Generated artifacts and their identifiers.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable name of one generated output, e.g. `Geometry.Circle.g.cs`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// `namespace.name` plus `suffix`, or `name` plus `suffix` in the global
    /// namespace.
    pub fn new(namespace: &str, name: &str, suffix: &str) -> Self {
        if namespace.is_empty() {
            Self(format!("{name}{suffix}"))
        } else {
            Self(format!("{namespace}.{name}{suffix}"))
        }
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArtifactId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One rendered output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    /// Where the host should place the text.
    pub id: ArtifactId,
    /// The generated source.
    pub text: String,
}
