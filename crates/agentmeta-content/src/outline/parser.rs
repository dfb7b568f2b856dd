//! Document-level property drawer extraction.
//!
//! ```org
//! :PROPERTIES:
//! :NAME: researcher
//! :TOOLS: read search
//! :END:
//!
//! You dig through sources and summarize them.
//! ```
//!
//! Keys are folded to lowercase, the engine-supplied `category` property is
//! dropped before validation, and `tools` is split into tokens. The body
//! starts on the first non-blank line after `:END:`.

use std::path::Path;

use agentmeta_core::{AllowList, KeyValidator, MetaKey, MetaValue, ParsedDocument, Result};

use super::engine::{OrgEngine, OutlineEngine};
use crate::fields::{self, Fields};
use crate::text;

/// Extracts property-drawer metadata and body text from outline documents.
///
/// # Example
///
/// ```rust
/// use agentmeta_content::OutlineParser;
/// use agentmeta_core::MetaKey;
/// use std::path::Path;
///
/// let content = ":PROPERTIES:\n:NAME: researcher\n:TOOLS: read search\n:END:\n\nDig deep.\n";
/// let doc = OutlineParser::new()
///     .parse_str(content, Path::new("researcher.org"))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(doc.get_str(&MetaKey::NAME), Some("researcher"));
/// assert_eq!(doc.get_list(&MetaKey::TOOLS).unwrap(), ["read", "search"]);
/// assert!(!doc.contains_key(&MetaKey::CATEGORY));
/// assert_eq!(doc.system(), "Dig deep.");
/// ```
pub struct OutlineParser<E = OrgEngine> {
    engine: E,
    validator: Box<dyn KeyValidator>,
}

impl OutlineParser<OrgEngine> {
    /// Create a parser with the Org engine and the default allow-list.
    pub fn new() -> Self {
        Self {
            engine: OrgEngine,
            validator: Box::new(AllowList::default()),
        }
    }
}

impl Default for OutlineParser<OrgEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: OutlineEngine> OutlineParser<E> {
    /// Replace the outline engine.
    pub fn with_engine<T: OutlineEngine>(self, engine: T) -> OutlineParser<T> {
        OutlineParser {
            engine,
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
    /// Returns `Ok(None)` when the document has no leading property drawer.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Option<ParsedDocument>> {
        let path = path.as_ref();
        let content = text::read_document(path)?;
        self.parse_str(&content, path)
    }

    /// Parse in-memory content; `origin` names the document.
    pub fn parse_str(&self, content: &str, origin: &Path) -> Result<Option<ParsedDocument>> {
        extract(&self.engine, content, origin, &*self.validator)
    }
}

/// Parse an outline document with an optional validator.
///
/// Without a validator the default allow-list applies.
pub fn parse_outline_file(
    path: impl AsRef<Path>,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<ParsedDocument>> {
    let path = path.as_ref();
    let content = text::read_document(path)?;
    parse_outline_str(&content, path, validator)
}

/// Parse an in-memory outline document with an optional validator.
pub fn parse_outline_str(
    content: &str,
    origin: &Path,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<ParsedDocument>> {
    let default = AllowList::default();
    extract(&OrgEngine, content, origin, validator.unwrap_or(&default))
}

pub(crate) fn extract<E: OutlineEngine + ?Sized>(
    engine: &E,
    content: &str,
    origin: &Path,
    validator: &dyn KeyValidator,
) -> Result<Option<ParsedDocument>> {
    let Some(span) = engine.property_span(content, 0) else {
        log::debug!("No property drawer in {}", origin.display());
        return Ok(None);
    };

    let properties = engine.properties(content, origin, 0);
    let body_start = text::skip_blank_lines(content, text::next_line_start(content, span.end));
    log::trace!(
        "Property drawer in {} spans bytes {}..{}, body starts at {}",
        origin.display(),
        span.start,
        span.end,
        body_start
    );

    let mut fields = Fields::new();
    for (raw_key, raw_value) in properties {
        let key = MetaKey::lowercase(&raw_key);
        if key == MetaKey::CATEGORY {
            continue;
        }
        let value = if key == MetaKey::TOOLS {
            MetaValue::tokens(&raw_value)
        } else {
            MetaValue::Text(raw_value)
        };
        fields::admit(&mut fields, key, value, validator, origin)?;
    }

    let body = text::strip_trailing_newline(&content[body_start..]);
    Ok(Some(ParsedDocument::from_fields(fields, body)))
}

// ============================================================================
// Tests
// ============================================================================
