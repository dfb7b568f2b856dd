//! Injectable metadata key validation.
//!
//! Each parser call receives its own validator; there is no global
//! configuration. [`AllowList::default`] is used when none is supplied.
//!
//! # Example
//!
//! ```rust
//! use agentmeta_core::{AllowList, KeyValidator, MetaKey};
//!
//! // Extend the default allow-list
//! let validator = AllowList::default().with_key("temperature");
//! assert!(validator.allows(&MetaKey::new("temperature")));
//!
//! // Any closure works too
//! let prefixed = |key: &MetaKey| key.as_str().starts_with("x-");
//! assert!(prefixed.allows(&MetaKey::new("x-team")));
//! ```

use std::collections::BTreeSet;

use crate::key::MetaKey;

/// Keys accepted by the default validator.
pub const DEFAULT_KEYS: [MetaKey; 5] = [
    MetaKey::NAME,
    MetaKey::DESCRIPTION,
    MetaKey::TOOLS,
    MetaKey::BACKEND,
    MetaKey::MODEL,
];

/// Decides whether a metadata key may appear in a parse result.
pub trait KeyValidator: Send + Sync {
    /// Returns `true` if `key` is permitted.
    fn allows(&self, key: &MetaKey) -> bool;
}

impl<F> KeyValidator for F
where
    F: Fn(&MetaKey) -> bool + Send + Sync,
{
    fn allows(&self, key: &MetaKey) -> bool {
        self(key)
    }
}

/// Allow-list membership test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    keys: BTreeSet<MetaKey>,
}

impl AllowList {
    /// Create an allow-list from arbitrary keys.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<MetaKey>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a key to the list.
    pub fn with_key(mut self, key: impl Into<MetaKey>) -> Self {
        self.keys.insert(key.into());
        self
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_KEYS)
    }
}

impl KeyValidator for AllowList {
    fn allows(&self, key: &MetaKey) -> bool {
        self.keys.contains(key)
    }
}

/// Accepts every key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl KeyValidator for AllowAll {
    fn allows(&self, _key: &MetaKey) -> bool {
        true
    }
}
