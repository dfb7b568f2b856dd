//! Key-value markup decoding for delimited metadata blocks.

use agentmeta_core::{Error, MetaKey, MetaValue, Result};
use serde_yaml::Value;

/// Decodes the raw text between the `---` delimiters.
///
/// Implementations return pairs in document order; that order decides
/// which invalid key is reported first.
pub trait MarkupDecoder {
    /// Decode `raw` into ordered key-value pairs.
    fn decode(&self, raw: &str) -> Result<Vec<(MetaKey, MetaValue)>>;
}

/// YAML decoder backed by `serde_yaml`.
///
/// Keys become symbolic [`MetaKey`]s as written, mappings keep their
/// insertion order, and sequences stay ordered lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl MarkupDecoder for YamlDecoder {
    fn decode(&self, raw: &str) -> Result<Vec<(MetaKey, MetaValue)>> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_yaml::from_str(raw).map_err(|e| {
            Error::decode_with_source(format!("Failed to parse metadata block: {e}"), e)
        })?;

        match value {
            Value::Null => Ok(Vec::new()),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(key, value)| {
                    Ok::<_, Error>((decode_key(key)?, MetaValue::from_decoded(value)))
                })
                .collect(),
            other => Err(Error::decode(format!(
                "Metadata block must be a mapping, found {}",
                describe(&other)
            ))),
        }
    }
}

fn decode_key(key: Value) -> Result<MetaKey> {
    match key {
        Value::String(name) => Ok(MetaKey::new(name)),
        Value::Number(n) => Ok(MetaKey::new(n.to_string())),
        Value::Bool(b) => Ok(MetaKey::new(b.to_string())),
        other => Err(Error::decode(format!(
            "Metadata keys must be scalars, found {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
