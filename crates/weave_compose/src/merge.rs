//! Composition of resolved mixins into a single member list.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use weave_common::SymbolRef;
use weave_config::MergeConfig;
use weave_diagnostics::Diagnostic;
use weave_snapshot::{MemberFragment, MixinSource, MixinTarget};

use crate::errors;
use crate::resolve::ResolvedTarget;

/// The composed view of one target, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MergeResult {
    target: Arc<MixinTarget>,
    resolved_mixins: Vec<Arc<MixinSource>>,
    merged_members: Vec<MemberFragment>,
    merged_usings: BTreeSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl MergeResult {
    /// The target the members are composed into.
    pub fn target(&self) -> &Arc<MixinTarget> {
        &self.target
    }

    /// The sources that contributed members, in reference order.
    pub fn resolved_mixins(&self) -> &[Arc<MixinSource>] {
        &self.resolved_mixins
    }

    /// Every contributed member: mixin by mixin, each in declaration order.
    pub fn merged_members(&self) -> &[MemberFragment] {
        &self.merged_members
    }

    /// Union of the contributing mixins' usings, sorted.
    pub fn merged_usings(&self) -> &BTreeSet<String> {
        &self.merged_usings
    }

    /// Resolution and merge diagnostics for this target.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Namespace of the composed declaration.
    pub fn namespace(&self) -> &str {
        self.target.namespace()
    }
}

/// Appends the members of `resolved_mixins` to `target`.
///
/// Members are relocated verbatim and never deduplicated. With
/// `detect_duplicate_members` set, members whose host-supplied names collide
/// across mixins are reported but still appended.
pub fn merge(
    target: &Arc<MixinTarget>,
    resolved_mixins: &[Arc<MixinSource>],
    config: &MergeConfig,
) -> MergeResult {
    let mut merged_members = Vec::new();
    let mut merged_usings = BTreeSet::new();
    for mixin in resolved_mixins {
        merged_members.extend(mixin.members().iter().cloned());
        merged_usings.extend(mixin.usings().iter().cloned());
    }

    let diagnostics = if config.detect_duplicate_members {
        duplicate_members(target, resolved_mixins)
    } else {
        Vec::new()
    };

    MergeResult {
        target: Arc::clone(target),
        resolved_mixins: resolved_mixins.to_vec(),
        merged_members,
        merged_usings,
        diagnostics,
    }
}

/// Merges a resolved target, carrying its resolution diagnostics forward.
pub fn merge_resolved(resolved: &ResolvedTarget, config: &MergeConfig) -> MergeResult {
    let mut result = merge(resolved.target(), resolved.mixins(), config);
    let mut diagnostics = resolved.diagnostics().to_vec();
    diagnostics.append(&mut result.diagnostics);
    result.diagnostics = diagnostics;
    result
}

fn duplicate_members(target: &MixinTarget, mixins: &[Arc<MixinSource>]) -> Vec<Diagnostic> {
    let target_name = target.qualified_name();
    let mut owners: HashMap<&str, &MixinSource> = HashMap::new();
    let mut reported: HashSet<(&str, SymbolRef, SymbolRef)> = HashSet::new();
    let mut diagnostics = Vec::new();
    for mixin in mixins {
        for name in mixin.members().iter().filter_map(MemberFragment::name) {
            let Some(first) = owners.get(name).copied() else {
                owners.insert(name, mixin.as_ref());
                continue;
            };
            if first.identity() != mixin.identity()
                && reported.insert((name, first.identity(), mixin.identity()))
            {
                diagnostics.push(errors::warn_duplicate_member(
                    &target_name,
                    name,
                    &first.qualified_name(),
                    &mixin.qualified_name(),
                ));
            }
        }
    }
    diagnostics
}
