//! Resolution of a target's mixin references against the known sources.
//!
//! Matching is by [`SymbolRef`] identity only: two mixins that share a simple
//! name in different namespaces never collide, and a name the host did not
//! bind never matches anything.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use weave_common::{Interner, SymbolRef};
use weave_diagnostics::Diagnostic;
use weave_snapshot::{MixinSource, MixinTarget};

use crate::errors;

/// Every mixin source known to a run, indexed by identity.
#[derive(Debug, Default)]
pub struct MixinUniverse {
    by_identity: HashMap<SymbolRef, Arc<MixinSource>>,
}

impl MixinUniverse {
    /// Creates an empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a universe from sources in declaration order.
    pub fn from_sources(sources: impl IntoIterator<Item = Arc<MixinSource>>) -> Self {
        let mut universe = Self::new();
        for source in sources {
            universe.insert(source);
        }
        universe
    }

    /// Registers a source. The first source to claim an identity keeps it;
    /// later claimants are ignored and `false` is returned.
    pub fn insert(&mut self, source: Arc<MixinSource>) -> bool {
        let identity = source.identity();
        if self.by_identity.contains_key(&identity) {
            tracing::warn!(
                mixin = source.name(),
                namespace = source.namespace(),
                "mixin identity already registered, ignoring later declaration"
            );
            return false;
        }
        self.by_identity.insert(identity, source);
        true
    }

    /// Looks up a source by identity.
    pub fn get(&self, identity: SymbolRef) -> Option<&Arc<MixinSource>> {
        self.by_identity.get(&identity)
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    /// Returns `true` when no source is registered.
    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }
}

/// Everything resolution of one target depends on.
///
/// This is the universe projected onto the target's references: entry `i` of
/// `candidates` is the source found for `target.mixin_refs()[i]`. Two equal
/// inputs always resolve to equal outputs, which makes this the memoization
/// key of the resolve stage. Edits to sources the target does not reference
/// leave it unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolveInput {
    target: Arc<MixinTarget>,
    candidates: Vec<Option<Arc<MixinSource>>>,
}

impl ResolveInput {
    /// Projects `universe` onto the references of `target`.
    pub fn project(target: &Arc<MixinTarget>, universe: &MixinUniverse) -> Self {
        let candidates = target
            .mixin_refs()
            .iter()
            .map(|r| r.and_then(|sym| universe.get(sym).cloned()))
            .collect();
        Self {
            target: Arc::clone(target),
            candidates,
        }
    }

    /// The target being resolved.
    pub fn target(&self) -> &Arc<MixinTarget> {
        &self.target
    }

    /// Resolves the projected references.
    ///
    /// `interner` names unknown references in diagnostics.
    pub fn resolve(&self, interner: &Interner) -> ResolvedTarget {
        let target_name = self.target.qualified_name();
        let mut mixins = Vec::new();
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();

        for (position, (reference, candidate)) in self
            .target
            .mixin_refs()
            .iter()
            .zip(&self.candidates)
            .enumerate()
        {
            let Some(symbol) = *reference else {
                diagnostics.push(errors::error_unbound_mixin(&target_name, position));
                continue;
            };
            if !seen.insert(symbol) {
                diagnostics.push(errors::warn_duplicate_mixin(
                    &target_name,
                    symbol.display(interner),
                ));
                continue;
            }
            match candidate {
                Some(source) => mixins.push(Arc::clone(source)),
                None => diagnostics.push(errors::error_unresolved_mixin(
                    &target_name,
                    symbol.display(interner),
                )),
            }
        }

        ResolvedTarget {
            target: Arc::clone(&self.target),
            mixins,
            diagnostics,
        }
    }
}

/// A target paired with the sources its references resolved to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedTarget {
    target: Arc<MixinTarget>,
    mixins: Vec<Arc<MixinSource>>,
    diagnostics: Vec<Diagnostic>,
}

impl ResolvedTarget {
    /// The target.
    pub fn target(&self) -> &Arc<MixinTarget> {
        &self.target
    }

    /// Resolved sources, deduplicated, in reference order.
    pub fn mixins(&self) -> &[Arc<MixinSource>] {
        &self.mixins
    }

    /// Problems found while resolving.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Resolves the mixin references of `target` against `universe`.
///
/// Never fails: unknown, unbound and repeated references become diagnostics
/// and the remaining references still resolve.
pub fn resolve(
    target: &Arc<MixinTarget>,
    universe: &MixinUniverse,
    interner: &Interner,
) -> ResolvedTarget {
    ResolveInput::project(target, universe).resolve(interner)
}
