//! Immutable, value-comparable snapshots of mixin declarations.
//!
//! The host exposes its live declarations through the [`DeclarationNode`]
//! trait. [`extract`] projects a node into a fully-owned [`Snapshot`]: either a
//! [`MixinSource`] (marked to donate members) or a [`MixinTarget`] (marked to
//! receive them). Snapshots hold no reference into the host tree and compare
//! structurally, so an unchanged declaration always re-extracts to an equal
//! value and downstream work can be skipped.

#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod member;
pub mod node;
pub mod source;
pub mod target;

pub use error::ExtractError;
pub use extract::{extract, try_extract, Snapshot};
pub use member::MemberFragment;
pub use node::{DeclNode, DeclarationNode, MarkerArg, UsingDirective};
pub use source::MixinSource;
pub use target::MixinTarget;
