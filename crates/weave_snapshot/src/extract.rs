//! Projection of live declarations into snapshots.

use crate::error::ExtractError;
use crate::node::{DeclarationNode, MarkerArg};
use crate::source::MixinSource;
use crate::target::{MixinTarget, DEFAULT_KEYWORD};

/// The value extracted from a marked declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Snapshot {
    /// A declaration marked as a mixin.
    Source(MixinSource),
    /// A declaration that requests mixins.
    Target(MixinTarget),
}

/// Projects `node` into its snapshots, empty when it carries no marker.
///
/// A declaration marked both ways yields its source snapshot followed by its
/// target snapshot. Malformed declarations yield nothing; use
/// [`try_extract`] to tell them apart.
pub fn extract(node: &dyn DeclarationNode) -> Vec<Snapshot> {
    try_extract(node).unwrap_or_default()
}

/// Projects `node` into one snapshot per role it plays.
///
/// Returns an empty list for unmarked declarations, and an error for marked
/// ones that cannot be projected. Pure: identical node content always yields
/// equal snapshots.
pub fn try_extract(node: &dyn DeclarationNode) -> Result<Vec<Snapshot>, ExtractError> {
    let is_source = node.has_mixin_marker();
    let is_target = !node.target_markers().is_empty();
    if !is_source && !is_target {
        return Ok(Vec::new());
    }

    let name = node.name().trim();
    if name.is_empty() {
        return Err(ExtractError::MissingName);
    }
    let namespace = namespace_of(node, name)?;

    let mut snapshots = Vec::with_capacity(2);
    if is_source {
        snapshots.push(Snapshot::Source(source_of(node, name, &namespace)?));
    }
    if is_target {
        snapshots.push(Snapshot::Target(target_of(node, name, &namespace)));
    }
    Ok(snapshots)
}

fn source_of(
    node: &dyn DeclarationNode,
    name: &str,
    namespace: &str,
) -> Result<MixinSource, ExtractError> {
    let identity = node.symbol().ok_or_else(|| ExtractError::MissingIdentity {
        name: name.to_string(),
    })?;
    let usings = node
        .usings()
        .iter()
        .filter(|u| !u.global)
        .map(|u| u.name.clone())
        .collect();
    Ok(MixinSource::new(
        name,
        namespace,
        usings,
        node.members().to_vec(),
        identity,
    ))
}

fn target_of(node: &dyn DeclarationNode, name: &str, namespace: &str) -> MixinTarget {
    let keyword = match node.keyword().trim() {
        "" => DEFAULT_KEYWORD,
        kw => kw,
    };
    let mixin_refs = node
        .target_markers()
        .iter()
        .flatten()
        .flat_map(|arg| match arg {
            MarkerArg::Single(sym) => vec![*sym],
            MarkerArg::Array(syms) => syms.clone(),
        })
        .collect();

    MixinTarget::new(
        name,
        namespace,
        keyword,
        node.modifiers().to_vec(),
        node.base_list().map(str::trim).unwrap_or_default(),
        mixin_refs,
    )
}

/// Nearest block namespaces joined with `.`, else the file-scoped one.
fn namespace_of(node: &dyn DeclarationNode, name: &str) -> Result<String, ExtractError> {
    let namespace = if node.enclosing_namespaces().is_empty() {
        node.file_scoped_namespace().unwrap_or_default().trim().to_string()
    } else {
        node.enclosing_namespaces()
            .iter()
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(".")
    };

    if !namespace.is_empty() && namespace.split('.').any(|seg| seg.trim().is_empty()) {
        return Err(ExtractError::MalformedNamespace {
            name: name.to_string(),
            namespace,
        });
    }
    Ok(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemberFragment;
    use crate::node::DeclNode;
    use weave_common::Interner;

    fn source_node(interner: &Interner) -> DeclNode {
        DeclNode::new("Shape")
            .in_namespace("Geometry")
            .with_using("System")
            .with_global_using("System.Linq")
            .with_using("System.Text")
            .with_symbol(interner.symbol("Geometry.Shape"))
            .mixin_source()
            .with_member("public int Area() => 0;")
            .with_member("private int _sides = 0;")
    }

    #[test]
    fn unmarked_declaration_yields_nothing() {
        let node = DeclNode::new("Plain").with_member("int X;");
        assert_eq!(try_extract(&node), Ok(vec![]));
        assert!(extract(&node).is_empty());
    }

    #[test]
    fn extracts_mixin_source() {
        let interner = Interner::new();
        let snapshots = extract(&source_node(&interner));
        let [Snapshot::Source(src)] = &snapshots[..] else {
            panic!("expected a mixin source");
        };
        assert_eq!(src.name(), "Shape");
        assert_eq!(src.namespace(), "Geometry");
        assert_eq!(src.usings(), ["System".to_string(), "System.Text".to_string()]);
        assert_eq!(src.members().len(), 2);
        assert_eq!(src.members()[0].text(), "public int Area() => 0;");
        assert_eq!(src.identity(), interner.symbol("Geometry.Shape"));
    }

    #[test]
    fn extraction_is_referentially_transparent() {
        let interner = Interner::new();
        let node = source_node(&interner);
        assert_eq!(extract(&node), extract(&node.clone()));
    }

    #[test]
    fn extracts_target_with_flattened_refs() {
        let interner = Interner::new();
        let a = interner.symbol("M.A");
        let b = interner.symbol("M.B");
        let c = interner.symbol("M.C");
        let node = DeclNode::new("Widget")
            .in_file_namespace("App")
            .with_modifiers(["internal", "partial"])
            .with_base_list(" Base, IThing ")
            .add_mixin(vec![MarkerArg::Single(Some(a)), MarkerArg::Array(vec![Some(b), None])])
            .add_mixins([Some(c)]);

        let snapshots = extract(&node);
        let [Snapshot::Target(target)] = &snapshots[..] else {
            panic!("expected a mixin target");
        };
        assert_eq!(target.namespace(), "App");
        assert_eq!(target.keyword(), "class");
        assert_eq!(target.modifiers(), ["internal".to_string(), "partial".to_string()]);
        assert_eq!(target.base_list(), "Base, IThing");
        assert_eq!(target.mixin_refs(), [Some(a), Some(b), None, Some(c)]);
    }

    #[test]
    fn nested_block_namespaces_are_joined() {
        let interner = Interner::new();
        let node = DeclNode::new("Inner")
            .in_namespace("Outer")
            .in_namespace("Nested")
            .add_mixins([Some(interner.symbol("X"))]);
        let snapshots = extract(&node);
        let [Snapshot::Target(target)] = &snapshots[..] else {
            panic!("expected a mixin target");
        };
        assert_eq!(target.namespace(), "Outer.Nested");
    }

    #[test]
    fn global_namespace_is_empty() {
        let interner = Interner::new();
        let node = DeclNode::new("Top").add_mixins([Some(interner.symbol("X"))]);
        let snapshots = extract(&node);
        let [Snapshot::Target(target)] = &snapshots[..] else {
            panic!("expected a mixin target");
        };
        assert_eq!(target.namespace(), "");
    }

    #[test]
    fn missing_name_is_malformed() {
        let node = DeclNode::new("  ").mixin_source();
        assert_eq!(try_extract(&node), Err(ExtractError::MissingName));
        assert!(extract(&node).is_empty());
    }

    #[test]
    fn both_markers_yield_source_then_target() {
        let interner = Interner::new();
        let base = interner.symbol("Geometry.Base");
        let node = source_node(&interner).add_mixins([Some(base)]);
        let snapshots = extract(&node);
        let [Snapshot::Source(src), Snapshot::Target(target)] = &snapshots[..] else {
            panic!("expected a source and a target");
        };
        assert_eq!(src.identity(), interner.symbol("Geometry.Shape"));
        assert_eq!(src.members().len(), 2);
        assert_eq!(target.qualified_name(), "Geometry.Shape");
        assert_eq!(target.mixin_refs(), [Some(base)]);
    }

    #[test]
    fn dual_role_without_symbol_is_malformed() {
        let node = DeclNode::new("Loose").mixin_source().add_mixins([None]);
        assert!(matches!(
            try_extract(&node),
            Err(ExtractError::MissingIdentity { .. })
        ));
    }

    #[test]
    fn unbound_source_is_malformed() {
        let node = DeclNode::new("Loose").mixin_source();
        assert!(matches!(
            try_extract(&node),
            Err(ExtractError::MissingIdentity { .. })
        ));
    }

    #[test]
    fn empty_namespace_segment_is_malformed() {
        let interner = Interner::new();
        let node = DeclNode::new("T")
            .in_file_namespace("A..B")
            .add_mixins([Some(interner.symbol("X"))]);
        assert!(matches!(
            try_extract(&node),
            Err(ExtractError::MalformedNamespace { .. })
        ));
    }

    #[test]
    fn member_names_survive_extraction() {
        let interner = Interner::new();
        let node = DeclNode::new("Named")
            .with_symbol(interner.symbol("Named"))
            .mixin_source()
            .with_named_member("Area", "public int Area() => 0;");
        let snapshots = extract(&node);
        let [Snapshot::Source(src)] = &snapshots[..] else {
            panic!("expected a mixin source");
        };
        assert_eq!(
            src.members(),
            [MemberFragment::named("Area", "public int Area() => 0;")]
        );
    }
}
