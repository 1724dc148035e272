//! Value-typed symbol identity.

use serde::{Deserialize, Serialize};

use crate::ident::{Ident, Interner};

/// Resolver-assigned identity of a declared type.
///
/// A `SymbolRef` is the interned fully-qualified name of the type the host
/// bound a declaration or a `typeof(...)` argument to. It is only ever used for
/// equality and hashing: it never owns or points into the host's symbol table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SymbolRef(Ident);

impl SymbolRef {
    /// Wraps an already-interned qualified name.
    pub fn from_ident(ident: Ident) -> Self {
        Self(ident)
    }

    /// Returns the interned qualified name.
    pub fn ident(self) -> Ident {
        self.0
    }

    /// Returns the qualified name, or a placeholder when `interner` did not
    /// issue this symbol.
    pub fn display(self, interner: &Interner) -> &str {
        interner.try_resolve(self.0).unwrap_or("<unknown symbol>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_resolves_qualified_name() {
        let interner = Interner::new();
        let sym = interner.symbol("Geometry.Shape");
        assert_eq!(sym.display(&interner), "Geometry.Shape");
    }

    #[test]
    fn display_foreign_symbol() {
        let interner = Interner::new();
        let sym = SymbolRef::from_ident(Ident::from_raw(99));
        assert_eq!(sym.display(&interner), "<unknown symbol>");
    }

    #[test]
    fn optional_refs_compare_null_safely() {
        let interner = Interner::new();
        let a = Some(interner.symbol("X"));
        let none: Option<SymbolRef> = None;
        assert_eq!(none, None);
        assert_ne!(a, none);
        assert_eq!(a, Some(interner.symbol("X")));
    }
}
