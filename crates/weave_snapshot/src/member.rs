//! Opaque member fragments.

use std::fmt;
use std::sync::Arc;

use weave_common::ContentHasher;

/// One member (field, property, method, ...) copied out of a mixin body.
///
/// The text is an immutable blob: composition relocates it but never looks
/// inside. The optional name is whatever identifier the host reported for the
/// member and is only consulted by the opt-in duplicate-member check.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MemberFragment {
    name: Option<Arc<str>>,
    text: Arc<str>,
}

impl MemberFragment {
    /// Creates an unnamed fragment from its source text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            name: None,
            text: text.into(),
        }
    }

    /// Creates a fragment whose declared name the host knows.
    pub fn named(name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            text: text.into(),
        }
    }

    /// The member's source text, exactly as declared.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The member's declared name, if the host supplied one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn feed(&self, hasher: &mut ContentHasher) {
        match &self.name {
            Some(name) => {
                hasher.write_u32(1);
                hasher.write_str(name);
            }
            None => hasher.write_u32(0),
        }
        hasher.write_str(&self.text);
    }
}

impl fmt::Debug for MemberFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "MemberFragment({name}: {:?})", self.text),
            None => write!(f, "MemberFragment({:?})", self.text),
        }
    }
}
