//! Snapshot of a declaration that requests mixins.

use std::hash::{Hash, Hasher};

use weave_common::{ContentHash, ContentHasher, SymbolRef};

/// Declaration keyword assumed when the host does not report one.
pub const DEFAULT_KEYWORD: &str = "class";

/// A mixin target: a declaration asking for one or more mixins' members.
///
/// `mixin_refs` keeps attribute-argument order, which is also the tie-break
/// order when composed members collide. A `None` entry is a reference the
/// host could not bind to any type; it compares equal to other `None`s.
#[derive(Clone, Debug)]
pub struct MixinTarget {
    name: String,
    namespace: String,
    keyword: String,
    modifiers: Vec<String>,
    base_list: String,
    mixin_refs: Vec<Option<SymbolRef>>,
    fingerprint: ContentHash,
}

impl MixinTarget {
    /// Builds a snapshot.
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        keyword: impl Into<String>,
        modifiers: Vec<String>,
        base_list: impl Into<String>,
        mixin_refs: Vec<Option<SymbolRef>>,
    ) -> Self {
        let name = name.into();
        let namespace = namespace.into();
        let keyword = keyword.into();
        let base_list = base_list.into();

        let mut hasher = ContentHasher::new();
        hasher.write_str(&name);
        hasher.write_str(&namespace);
        hasher.write_str(&keyword);
        hasher.write_strs(&modifiers);
        hasher.write_str(&base_list);
        hasher.write_len(mixin_refs.len());
        for r in &mixin_refs {
            match r {
                Some(sym) => {
                    hasher.write_u32(1);
                    hasher.write_u32(sym.ident().as_raw());
                }
                None => hasher.write_u32(0),
            }
        }

        Self {
            name,
            namespace,
            keyword,
            modifiers,
            base_list,
            mixin_refs,
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

    /// `class`, `struct`, `record`, ...
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Modifiers in source order.
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Raw base-type list without the leading colon; empty if none.
    pub fn base_list(&self) -> &str {
        &self.base_list
    }

    /// Requested mixins in attribute-argument order.
    pub fn mixin_refs(&self) -> &[Option<SymbolRef>] {
        &self.mixin_refs
    }

    /// `namespace.name`, or just `name` in the global namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Fingerprint over every field.
    pub fn fingerprint(&self) -> ContentHash {
        self.fingerprint
    }
}

impl PartialEq for MixinTarget {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.name == other.name
            && self.namespace == other.namespace
            && self.keyword == other.keyword
            && self.modifiers == other.modifiers
            && self.base_list == other.base_list
            && self.mixin_refs == other.mixin_refs
    }
}

impl Eq for MixinTarget {}

impl Hash for MixinTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}
