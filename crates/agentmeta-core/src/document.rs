//! The normalized parse result shared by every document format.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::key::MetaKey;
use crate::value::MetaValue;

/// Validated metadata plus the document body.
///
/// The body is always present under [`MetaKey::SYSTEM`]; the only way to
/// build a `ParsedDocument` is through a constructor that takes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedDocument {
    fields: BTreeMap<MetaKey, MetaValue>,
}

impl ParsedDocument {
    /// Create a result holding only the body text.
    pub fn new(body: impl Into<String>) -> Self {
        Self::from_fields(BTreeMap::new(), body)
    }

    /// Create a result from already validated fields and the body text.
    ///
    /// A `system` entry in `fields` is replaced by `body`.
    pub fn from_fields(mut fields: BTreeMap<MetaKey, MetaValue>, body: impl Into<String>) -> Self {
        fields.insert(MetaKey::SYSTEM, MetaValue::Text(body.into()));
        Self { fields }
    }

    /// The body text.
    pub fn system(&self) -> &str {
        self.get_str(&MetaKey::SYSTEM).unwrap_or_default()
    }

    /// Value for a key.
    pub fn get(&self, key: &MetaKey) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    /// Text value for a key, if it holds text.
    pub fn get_str(&self, key: &MetaKey) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Token list for a key, if it holds one.
    pub fn get_list(&self, key: &MetaKey) -> Option<&[String]> {
        self.get(key)?.as_list()
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &MetaKey) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of keys, including `system`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`: `system` is always present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Metadata entries without the body.
    pub fn metadata(&self) -> impl Iterator<Item = (&MetaKey, &MetaValue)> {
        self.fields.iter().filter(|(key, _)| !key.is_reserved())
    }
}
