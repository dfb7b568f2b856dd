//! Symbolic metadata keys.
//!
//! Keys are compared by value but the well-known ones are `'static`
//! constants, so matching against them never allocates.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Serialize, Serializer};

/// A metadata key such as `name` or `tools`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetaKey(Cow<'static, str>);

impl MetaKey {
    /// Agent name.
    pub const NAME: MetaKey = MetaKey::from_static("name");
    /// One-line agent description.
    pub const DESCRIPTION: MetaKey = MetaKey::from_static("description");
    /// Capability list, always a token sequence.
    pub const TOOLS: MetaKey = MetaKey::from_static("tools");
    /// Backend the agent runs on.
    pub const BACKEND: MetaKey = MetaKey::from_static("backend");
    /// Model identifier.
    pub const MODEL: MetaKey = MetaKey::from_static("model");
    /// Reserved key holding the document body.
    pub const SYSTEM: MetaKey = MetaKey::from_static("system");
    /// Implicit outline property, never part of a result.
    pub const CATEGORY: MetaKey = MetaKey::from_static("category");

    /// Create a key from decoded text, keeping its case.
    pub fn new(name: impl Into<String>) -> Self {
        MetaKey(Cow::Owned(name.into()))
    }

    /// Create a key from a static string.
    pub const fn from_static(name: &'static str) -> Self {
        MetaKey(Cow::Borrowed(name))
    }

    /// Create a key with its text folded to lowercase.
    ///
    /// ```
    /// use agentmeta_core::MetaKey;
    ///
    /// assert_eq!(MetaKey::lowercase("TOOLS"), MetaKey::TOOLS);
    /// ```
    pub fn lowercase(name: &str) -> Self {
        MetaKey(Cow::Owned(name.to_lowercase()))
    }

    /// The key's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved body key.
    pub fn is_reserved(&self) -> bool {
        *self == Self::SYSTEM
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetaKey {
    fn from(name: &str) -> Self {
        MetaKey::new(name)
    }
}

impl From<String> for MetaKey {
    fn from(name: String) -> Self {
        MetaKey::new(name)
    }
}

impl AsRef<str> for MetaKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MetaKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for MetaKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
