//! Parsing and validation of `weave.toml` configuration files.
//!
//! This crate reads the composer configuration and produces a strongly-typed
//! [`WeaveConfig`] covering rendering, merge policy, and pipeline scheduling.
//! Every key is optional; an absent file section falls back to its default.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
