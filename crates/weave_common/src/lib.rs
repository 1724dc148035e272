//! Shared foundational types used across the Weave mixin composer.
//!
//! This crate provides interned identifiers, the value-typed [`SymbolRef`]
//! identity used to pair mixin targets with their sources, streaming content
//! fingerprints, and the internal error type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;
pub mod symbol;

pub use hash::{ContentHash, ContentHasher};
pub use ident::{Ident, Interner};
pub use result::{InternalError, WeaveResult};
pub use symbol::SymbolRef;
