//! Shared types, errors, and key validation for agentmeta.
//!
//! This crate provides the foundational types used across all agentmeta
//! crates. It has no internal agentmeta dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`key`]: Symbolic metadata keys
//! - [`value`]: Metadata values
//! - [`document`]: The normalized parse result
//! - [`validator`]: Injectable key validation

#![doc = include_str!("../README.md")]

pub mod document;
pub mod error;
pub mod key;
pub mod validator;
pub mod value;

// Re-export key types at crate root for convenience
pub use document::ParsedDocument;
pub use error::{Error, Result};
pub use key::MetaKey;
pub use validator::{AllowAll, AllowList, DEFAULT_KEYS, KeyValidator};
pub use value::MetaValue;
