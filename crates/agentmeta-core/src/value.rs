//! Metadata values.

use serde::Serialize;
use serde_yaml::Value;

/// The value of a single metadata key.
///
/// Values are untyped from the parser's point of view; only `tools` is
/// reshaped (into [`MetaValue::List`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Scalar text.
    Text(String),
    /// Ordered sequence of text tokens.
    List(Vec<String>),
    /// Any other decoded markup value, passed through untouched.
    Decoded(Value),
}

impl MetaValue {
    /// Split text on whitespace into a token list.
    ///
    /// Empty or all-whitespace text yields an empty list.
    ///
    /// ```
    /// use agentmeta_core::MetaValue;
    ///
    /// let tools = MetaValue::tokens("read write  search");
    /// assert_eq!(tools.as_list().unwrap(), ["read", "write", "search"]);
    /// assert_eq!(MetaValue::tokens(""), MetaValue::List(vec![]));
    /// ```
    pub fn tokens(text: &str) -> Self {
        MetaValue::List(text.split_whitespace().map(String::from).collect())
    }

    /// Classify a decoded markup value.
    ///
    /// Strings become [`MetaValue::Text`], sequences made only of strings
    /// become [`MetaValue::List`], everything else is kept as decoded.
    pub fn from_decoded(value: Value) -> Self {
        match value {
            Value::String(text) => MetaValue::Text(text),
            Value::Sequence(items) if items.iter().all(Value::is_string) => MetaValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => MetaValue::Decoded(other),
        }
    }

    /// Text content, if this is a [`MetaValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Token list, if this is a [`MetaValue::List`].
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(text: &str) -> Self {
        MetaValue::Text(text.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(text: String) -> Self {
        MetaValue::Text(text)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items)
    }
}
