//! Snapshot of a declaration marked as a mixin source.

use std::hash::{Hash, Hasher};

use weave_common::{ContentHash, ContentHasher, SymbolRef};

use crate::member::MemberFragment;

/// A mixin source: a declaration whose members may be copied into targets.
///
/// Immutable once built. Equality covers every field and is short-circuited
/// by a fingerprint computed at construction; hashing uses the fingerprint
/// alone.
#[derive(Clone, Debug)]
pub struct MixinSource {
    name: String,
    namespace: String,
    usings: Vec<String>,
    members: Vec<MemberFragment>,
    identity: SymbolRef,
    fingerprint: ContentHash,
}

impl MixinSource {
    /// Builds a snapshot. `members` must be in declaration order.
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        usings: Vec<String>,
        members: Vec<MemberFragment>,
        identity: SymbolRef,
    ) -> Self {
        let name = name.into();
        let namespace = namespace.into();

        let mut hasher = ContentHasher::new();
        hasher.write_str(&name);
        hasher.write_str(&namespace);
        hasher.write_strs(&usings);
        hasher.write_len(members.len());
        for member in &members {
            member.feed(&mut hasher);
        }
        hasher.write_u32(identity.ident().as_raw());

        Self {
            name,
            namespace,
            usings,
            members,
            identity,
            fingerprint: hasher.finish(),
        }
    }

    /// The declaration's simple name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted namespace, empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Explicit, non-global imports visible at the declaration site, in order.
    pub fn usings(&self) -> &[String] {
        &self.usings
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[MemberFragment] {
        &self.members
    }

    /// `namespace.name`, or just `name` in the global namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Resolver-assigned identity of this declaration.
    pub fn identity(&self) -> SymbolRef {
        self.identity
    }

    /// Fingerprint over every field.
    pub fn fingerprint(&self) -> ContentHash {
        self.fingerprint
    }
}

impl PartialEq for MixinSource {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.identity == other.identity
            && self.name == other.name
            && self.namespace == other.namespace
            && self.usings == other.usings
            && self.members == other.members
    }
}

impl Eq for MixinSource {}

impl Hash for MixinSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}
