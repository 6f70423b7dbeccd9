//! Scenetag core — shared types and errors for the plugin adapter.
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`envelope`]: Invocation envelope types exchanged with the host

#![doc = include_str!("../README.md")]

pub mod envelope;
pub mod error;

// Re-export key types at crate root for convenience
pub use envelope::{ConnectionInfo, PluginInput, PluginOutput};
pub use error::{Error, Result};
