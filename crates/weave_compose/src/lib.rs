//! Mixin resolution and member composition.
//!
//! [`resolve`] pairs a [`MixinTarget`](weave_snapshot::MixinTarget) with the
//! sources its references name, and [`merge`] appends those sources' members
//! into a [`MergeResult`]. Both are total: every problem is returned as a
//! diagnostic alongside a best-effort result.

#![warn(missing_docs)]

pub mod errors;
pub mod merge;
pub mod resolve;

pub use merge::{merge, merge_resolved, MergeResult};
pub use resolve::{resolve, MixinUniverse, ResolveInput, ResolvedTarget};
