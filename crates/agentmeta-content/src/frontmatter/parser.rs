//! Delimited metadata block extraction.
//!
//! A document carries frontmatter when its very first line is `---`
//! (trailing whitespace allowed). The block runs until the next such line;
//! everything after that line is the body.
//!
//! ```markdown
//! ---
//! name: reviewer
//! tools: read search
//! ---
//! You review pull requests.
//! ```

use std::path::Path;

use agentmeta_core::{AllowList, Error, KeyValidator, MetaKey, MetaValue, ParsedDocument, Result};
use serde_yaml::Value;

use super::decoder::{MarkupDecoder, YamlDecoder};
use crate::fields::{self, Fields};
use crate::text;

/// Whether a line (without its newline) is a `---` block delimiter.
pub fn is_delimiter(line: &str) -> bool {
    line.strip_prefix("---")
        .is_some_and(|rest| rest.trim().is_empty())
}

/// Extracts frontmatter metadata and body text.
///
/// # Example
///
/// ```rust
/// use agentmeta_content::FrontmatterParser;
/// use agentmeta_core::MetaKey;
/// use std::path::Path;
///
/// let content = "---\nname: reviewer\ntools: read search\n---\nYou review code.\n";
/// let doc = FrontmatterParser::new()
///     .parse_str(content, Path::new("reviewer.md"))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(doc.get_str(&MetaKey::NAME), Some("reviewer"));
/// assert_eq!(doc.get_list(&MetaKey::TOOLS).unwrap(), ["read", "search"]);
/// assert_eq!(doc.system(), "You review code.");
/// ```
pub struct FrontmatterParser<D = YamlDecoder> {
    decoder: D,
    validator: Box<dyn KeyValidator>,
}

impl FrontmatterParser<YamlDecoder> {
    /// Create a parser with the YAML decoder and the default allow-list.
    pub fn new() -> Self {
        Self {
            decoder: YamlDecoder,
            validator: Box::new(AllowList::default()),
        }
    }
}

impl Default for FrontmatterParser<YamlDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: MarkupDecoder> FrontmatterParser<D> {
    /// Replace the markup decoder.
    pub fn with_decoder<T: MarkupDecoder>(self, decoder: T) -> FrontmatterParser<T> {
        FrontmatterParser {
            decoder,
            validator: self.validator,
        }
    }

    /// Replace the key validator.
    pub fn with_validator(mut self, validator: impl KeyValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Parse a file on disk.
    ///
    /// Returns `Ok(None)` when the file does not start with a delimiter.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Option<ParsedDocument>> {
        let path = path.as_ref();
        let content = text::read_document(path)?;
        self.parse_str(&content, path)
    }

    /// Parse in-memory content; `origin` is only used in error reports.
    pub fn parse_str(&self, content: &str, origin: &Path) -> Result<Option<ParsedDocument>> {
        extract(&self.decoder, content, origin, &*self.validator)
    }
}

/// Parse a frontmatter document with an optional validator.
///
/// Without a validator the default allow-list
/// (`name`, `description`, `tools`, `backend`, `model`) applies.
pub fn parse_frontmatter_file(
    path: impl AsRef<Path>,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<ParsedDocument>> {
    let path = path.as_ref();
    let content = text::read_document(path)?;
    parse_frontmatter_str(&content, path, validator)
}

/// Parse frontmatter from in-memory content with an optional validator.
pub fn parse_frontmatter_str(
    content: &str,
    origin: &Path,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<ParsedDocument>> {
    let default = AllowList::default();
    extract(&YamlDecoder, content, origin, validator.unwrap_or(&default))
}

pub(crate) fn extract<D: MarkupDecoder + ?Sized>(
    decoder: &D,
    content: &str,
    origin: &Path,
    validator: &dyn KeyValidator,
) -> Result<Option<ParsedDocument>> {
    let mut lines = text::lines(content);

    let block_start = match lines.next() {
        Some(first) if is_delimiter(first.text) => first.next,
        _ => {
            log::debug!("No frontmatter in {}", origin.display());
            return Ok(None);
        }
    };

    let closing = lines
        .find(|line| is_delimiter(line.text))
        .ok_or_else(|| Error::malformed_block(origin))?;

    let raw = &content[block_start..closing.start];
    let pairs = decoder.decode(raw)?;
    log::trace!(
        "Frontmatter in {} spans bytes {}..{} with {} keys",
        origin.display(),
        block_start,
        closing.start,
        pairs.len()
    );

    let mut fields = Fields::new();
    for (key, value) in pairs {
        let value = match value {
            MetaValue::Text(tools) if key == MetaKey::TOOLS => MetaValue::tokens(&tools),
            MetaValue::Decoded(Value::Null) if key == MetaKey::TOOLS => {
                MetaValue::List(Vec::new())
            }
            other => other,
        };
        fields::admit(&mut fields, key, value, validator, origin)?;
    }

    let body = text::strip_trailing_newline(&content[closing.next..]);
    Ok(Some(ParsedDocument::from_fields(fields, body)))
}

// ============================================================================
// Tests
// ============================================================================
