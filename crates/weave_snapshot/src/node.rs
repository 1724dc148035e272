//! The host-facing view of a declaration.
//!
//! Parsing and binding belong to the host compiler. Whatever tree it keeps,
//! it exposes each candidate type declaration through [`DeclarationNode`].
//! [`DeclNode`] is an owned implementation for hosts that materialize their
//! declarations up front, and for tests.

use weave_common::SymbolRef;

use crate::member::MemberFragment;

/// One constructor argument of a target-marker attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerArg {
    /// `typeof(X)`. `None` when the host could not bind `X`.
    Single(Option<SymbolRef>),
    /// `params Type[]` passed explicitly as an array.
    Array(Vec<Option<SymbolRef>>),
}

/// An import directive at the top of the declaring file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsingDirective {
    /// The imported name, e.g. `System.Text`.
    pub name: String,
    /// `global using ...` directives are visible everywhere and not copied.
    pub global: bool,
}

/// Read-only queries the extractor needs from a live declaration.
///
/// Implementations must not mutate the host tree. Returned slices are copied
/// by the extractor, so they may borrow from the node.
pub trait DeclarationNode {
    /// Whether the declaration carries the zero-argument mixin-source marker.
    fn has_mixin_marker(&self) -> bool;

    /// Constructor arguments of every mixin-target marker on the declaration,
    /// one inner list per attribute, in source order. Empty when unmarked.
    fn target_markers(&self) -> &[Vec<MarkerArg>];

    /// The declaration's identifier.
    fn name(&self) -> &str;

    /// Enclosing block namespaces, outermost first.
    fn enclosing_namespaces(&self) -> &[String];

    /// The file-scoped namespace of the declaring file, if any.
    fn file_scoped_namespace(&self) -> Option<&str>;

    /// `class`, `struct`, `record`, ...
    fn keyword(&self) -> &str;

    /// Modifier keywords in source order.
    fn modifiers(&self) -> &[String];

    /// The raw base-type list without the leading colon.
    fn base_list(&self) -> Option<&str>;

    /// Import directives of the declaring file.
    fn usings(&self) -> &[UsingDirective];

    /// Member declarations in source order.
    fn members(&self) -> &[MemberFragment];

    /// The symbol the host bound this declaration to.
    fn symbol(&self) -> Option<SymbolRef>;
}

impl<T: DeclarationNode + ?Sized> DeclarationNode for &T {
    fn has_mixin_marker(&self) -> bool {
        (**self).has_mixin_marker()
    }

    fn target_markers(&self) -> &[Vec<MarkerArg>] {
        (**self).target_markers()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn enclosing_namespaces(&self) -> &[String] {
        (**self).enclosing_namespaces()
    }

    fn file_scoped_namespace(&self) -> Option<&str> {
        (**self).file_scoped_namespace()
    }

    fn keyword(&self) -> &str {
        (**self).keyword()
    }

    fn modifiers(&self) -> &[String] {
        (**self).modifiers()
    }

    fn base_list(&self) -> Option<&str> {
        (**self).base_list()
    }

    fn usings(&self) -> &[UsingDirective] {
        (**self).usings()
    }

    fn members(&self) -> &[MemberFragment] {
        (**self).members()
    }

    fn symbol(&self) -> Option<SymbolRef> {
        (**self).symbol()
    }
}

/// An owned, in-memory declaration node.
///
/// ```
/// use weave_common::Interner;
/// use weave_snapshot::DeclNode;
///
/// let interner = Interner::new();
/// let shape = DeclNode::new("Shape")
///     .in_namespace("Geometry")
///     .with_symbol(interner.symbol("Geometry.Shape"))
///     .mixin_source()
///     .with_member("public int Area() => 0;");
/// assert!(shape.is_mixin_source());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeclNode {
    name: String,
    keyword: String,
    namespaces: Vec<String>,
    file_namespace: Option<String>,
    modifiers: Vec<String>,
    base_list: Option<String>,
    usings: Vec<UsingDirective>,
    members: Vec<MemberFragment>,
    symbol: Option<SymbolRef>,
    mixin_marker: bool,
    target_markers: Vec<Vec<MarkerArg>>,
}

impl DeclNode {
    /// Creates an unmarked `class` declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyword: crate::target::DEFAULT_KEYWORD.to_string(),
            ..Self::default()
        }
    }

    /// Sets the declaration keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Nests the declaration in a block namespace (innermost last).
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Sets the file-scoped namespace of the declaring file.
    pub fn in_file_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.file_namespace = Some(namespace.into());
        self
    }

    /// Appends modifiers in order.
    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers.extend(modifiers.into_iter().map(Into::into));
        self
    }

    /// Sets the raw base-type list.
    pub fn with_base_list(mut self, base_list: impl Into<String>) -> Self {
        self.base_list = Some(base_list.into());
        self
    }

    /// Adds a `using` directive.
    pub fn with_using(mut self, name: impl Into<String>) -> Self {
        self.usings.push(UsingDirective {
            name: name.into(),
            global: false,
        });
        self
    }

    /// Adds a `global using` directive.
    pub fn with_global_using(mut self, name: impl Into<String>) -> Self {
        self.usings.push(UsingDirective {
            name: name.into(),
            global: true,
        });
        self
    }

    /// Appends an unnamed member.
    pub fn with_member(mut self, text: impl AsRef<str>) -> Self {
        self.members.push(MemberFragment::new(text.as_ref()));
        self
    }

    /// Appends a member whose declared name is known.
    pub fn with_named_member(mut self, name: impl AsRef<str>, text: impl AsRef<str>) -> Self {
        self.members
            .push(MemberFragment::named(name.as_ref(), text.as_ref()));
        self
    }

    /// Binds the declaration to a symbol.
    pub fn with_symbol(mut self, symbol: SymbolRef) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Adds the mixin-source marker.
    pub fn mixin_source(mut self) -> Self {
        self.mixin_marker = true;
        self
    }

    /// Adds a mixin-target marker with the given constructor arguments.
    pub fn add_mixin(mut self, args: Vec<MarkerArg>) -> Self {
        self.target_markers.push(args);
        self
    }

    /// Adds a mixin-target marker listing each symbol as a separate
    /// `typeof(...)` argument.
    pub fn add_mixins<I>(self, refs: I) -> Self
    where
        I: IntoIterator<Item = Option<SymbolRef>>,
    {
        let args = refs.into_iter().map(MarkerArg::Single).collect();
        self.add_mixin(args)
    }

    /// Whether this node carries the mixin-source marker.
    pub fn is_mixin_source(&self) -> bool {
        self.mixin_marker
    }

    /// Replaces all members, keeping every other property.
    pub fn replace_members(mut self, members: Vec<MemberFragment>) -> Self {
        self.members = members;
        self
    }
}

impl DeclarationNode for DeclNode {
    fn has_mixin_marker(&self) -> bool {
        self.mixin_marker
    }

    fn target_markers(&self) -> &[Vec<MarkerArg>] {
        &self.target_markers
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn enclosing_namespaces(&self) -> &[String] {
        &self.namespaces
    }

    fn file_scoped_namespace(&self) -> Option<&str> {
        self.file_namespace.as_deref()
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    fn base_list(&self) -> Option<&str> {
        self.base_list.as_deref()
    }

    fn usings(&self) -> &[UsingDirective] {
        &self.usings
    }

    fn members(&self) -> &[MemberFragment] {
        &self.members
    }

    fn symbol(&self) -> Option<SymbolRef> {
        self.symbol
    }
}
