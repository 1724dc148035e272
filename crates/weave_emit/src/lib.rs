//! Deterministic rendering of composed targets into generated source text.
//!
//! [`render`] turns a [`MergeResult`](weave_compose::MergeResult) into an
//! [`Artifact`]: a stable [`ArtifactId`] plus the text of a partial
//! declaration carrying the composed members. Identical input always renders
//! byte-identical text.

#![warn(missing_docs)]

pub mod artifact;
pub mod builder;
pub mod render;

pub use artifact::{Artifact, ArtifactId};
pub use builder::CodeBuilder;
pub use render::{artifact_id, render};
