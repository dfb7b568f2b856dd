//! Outline document queries used by the property-block parser.
//!
//! The parser only needs two answers from an outline engine: where the
//! property drawer attached to a position lives, and which properties are
//! visible there. [`OrgEngine`] answers both for Org documents without
//! evaluating anything in them.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::text;

static PROPERTY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*:(?P<key>\S+?)(?P<plus>\+)?:(?:[ \t]+(?P<value>.*?))?[ \t]*$")
        .expect("Invalid property line regex")
});

static HEADLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*+(?:[ \t]|$)").expect("Invalid headline regex"));

static CATEGORY_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*#\+CATEGORY:[ \t]*(?P<value>.*?)[ \t]*$")
        .expect("Invalid category keyword regex")
});

/// Byte range of a property drawer's contents.
///
/// `start` is the first line after `:PROPERTIES:`, `end` is the start of
/// the `:END:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpan {
    /// Offset of the first line inside the drawer.
    pub start: usize,
    /// Offset of the `:END:` line.
    pub end: usize,
}

/// Queries an outline document for property drawers.
pub trait OutlineEngine {
    /// The property drawer attached to the entry at `pos`, if any.
    fn property_span(&self, text: &str, pos: usize) -> Option<PropertySpan>;

    /// All properties visible at `pos`, as `(raw key, raw value)` pairs in
    /// resolution order. `origin` names the document for implicit values.
    fn properties(&self, text: &str, origin: &Path, pos: usize) -> Vec<(String, String)>;
}

/// Org-mode reader for the document-level (zeroth section) drawer.
///
/// Only positions before the first headline are answered. Every line
/// between `:PROPERTIES:` and `:END:` must be a property line; anything
/// else (blank lines included) means there is no property drawer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgEngine;

impl OrgEngine {
    /// Offset of the first headline, or the end of input.
    fn zeroth_section_end(text: &str) -> usize {
        text::lines(text)
            .find(|line| HEADLINE.is_match(line.text))
            .map_or(text.len(), |line| line.start)
    }

    /// Explicit `#+CATEGORY:` from the zeroth section.
    fn category_keyword(text: &str) -> Option<String> {
        let section_end = Self::zeroth_section_end(text);
        text::lines(&text[..section_end]).find_map(|line| {
            CATEGORY_KEYWORD
                .captures(trim_cr(line.text))
                .map(|caps| caps["value"].to_string())
        })
    }
}

impl OutlineEngine for OrgEngine {
    fn property_span(&self, text: &str, pos: usize) -> Option<PropertySpan> {
        if pos > 0 && pos >= Self::zeroth_section_end(text) {
            return None;
        }

        let mut lines =
            text::lines(text).skip_while(|line| line.is_blank() || is_comment(line.text));
        let opening = lines.next()?;
        if !trim_cr(opening.text).trim().eq_ignore_ascii_case(":PROPERTIES:") {
            return None;
        }

        for line in lines {
            let text = trim_cr(line.text);
            if text.trim().eq_ignore_ascii_case(":END:") {
                return Some(PropertySpan {
                    start: opening.next,
                    end: line.start,
                });
            }
            if !PROPERTY_LINE.is_match(text) {
                return None;
            }
        }
        None
    }

    fn properties(&self, text: &str, origin: &Path, pos: usize) -> Vec<(String, String)> {
        let Some(span) = self.property_span(text, pos) else {
            return Vec::new();
        };

        let mut properties: Vec<(String, String)> = Vec::new();
        for line in text::lines(&text[span.start..span.end]) {
            let Some(caps) = PROPERTY_LINE.captures(trim_cr(line.text)) else {
                continue;
            };
            let key = &caps["key"];
            let value = caps.name("value").map_or("", |m| m.as_str());

            let accumulated = if caps.name("plus").is_some() {
                properties
                    .iter_mut()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
            } else {
                None
            };
            if let Some((_, current)) = accumulated {
                if !current.is_empty() && !value.is_empty() {
                    current.push(' ');
                }
                current.push_str(value);
                continue;
            }
            properties.push((key.to_string(), value.to_string()));
        }

        let has_category = properties
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("CATEGORY"));
        if !has_category {
            let category = Self::category_keyword(text).or_else(|| {
                origin
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(String::from)
            });
            if let Some(category) = category {
                properties.push(("CATEGORY".to_string(), category));
            }
        }

        properties
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_comment(line: &str) -> bool {
    let line = trim_cr(line).trim_start();
    line == "#" || line.starts_with("# ") || line.starts_with("#\t")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn props(text: &str) -> Vec<(String, String)> {
        OrgEngine.properties(text, Path::new("/agents/helper.org"), 0)
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    // ------------------------------------------------------------------------
    // property_span tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_span_at_document_start() {
        let text = ":PROPERTIES:\n:NAME: helper\n:END:\nBody\n";
        let span = OrgEngine.property_span(text, 0).unwrap();
        assert_eq!(&text[span.start..span.end], ":NAME: helper\n");
        assert!(text[span.end..].starts_with(":END:"));
    }

    #[test]
    fn test_span_after_blank_and_comment_lines() {
        let text = "\n# a comment\n:properties:\n:NAME: x\n:end:\n";
        assert!(OrgEngine.property_span(text, 0).is_some());
    }

    #[test]
    fn test_no_span_when_text_comes_first() {
        let text = "Intro\n:PROPERTIES:\n:NAME: x\n:END:\n";
        assert!(OrgEngine.property_span(text, 0).is_none());
    }

    #[test]
    fn test_no_span_after_keyword_line() {
        let text = "#+TITLE: Agent\n:PROPERTIES:\n:NAME: x\n:END:\n";
        assert!(OrgEngine.property_span(text, 0).is_none());
    }

    #[test]
    fn test_no_span_without_end() {
        assert!(OrgEngine.property_span(":PROPERTIES:\n:NAME: x\n", 0).is_none());
    }

    #[test]
    fn test_no_span_when_headline_interrupts() {
        let text = ":PROPERTIES:\n:NAME: x\n* Heading\n:END:\n";
        assert!(OrgEngine.property_span(text, 0).is_none());
    }

    #[test]
    fn test_drawer_under_headline_is_not_document_level() {
        let text = "* Heading\n:PROPERTIES:\n:NAME: x\n:END:\n";
        assert!(OrgEngine.property_span(text, 0).is_none());
    }

    #[test]
    fn test_no_span_past_first_headline() {
        let text = ":PROPERTIES:\n:NAME: x\n:END:\n* Heading\nbody\n";
        let heading = text.find("* Heading").unwrap();
        assert!(OrgEngine.property_span(text, heading).is_none());
        assert!(OrgEngine.property_span(text, heading - 1).is_some());
    }

    #[test]
    fn test_empty_document() {
        assert!(OrgEngine.property_span("", 0).is_none());
        assert!(props("").is_empty());
    }

    // ------------------------------------------------------------------------
    // properties tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_properties_in_order_with_category() {
        let text = ":PROPERTIES:\n:NAME: helper\n:MODEL: opus\n:END:\n";
        assert_eq!(
            props(text),
            [pair("NAME", "helper"), pair("MODEL", "opus"), pair("CATEGORY", "helper")]
        );
    }

    #[test]
    fn test_category_from_keyword() {
        let text = "# notes\n:PROPERTIES:\n:NAME: x\n:END:\n#+CATEGORY: agents\n";
        assert_eq!(props(text).last().unwrap(), &pair("CATEGORY", "agents"));
    }

    #[test]
    fn test_explicit_category_not_duplicated() {
        let text = ":PROPERTIES:\n:CATEGORY: mine\n:END:\n";
        assert_eq!(props(text), [pair("CATEGORY", "mine")]);
    }

    #[test]
    fn test_empty_value() {
        let text = ":PROPERTIES:\n:TOOLS:\n:END:\n";
        assert_eq!(props(text)[0], pair("TOOLS", ""));
    }

    #[test]
    fn test_value_whitespace_trimmed() {
        let text = ":PROPERTIES:\n  :DESCRIPTION:   spaced out   \n:END:\n";
        assert_eq!(props(text)[0], pair("DESCRIPTION", "spaced out"));
    }

    #[test]
    fn test_plus_accumulates() {
        let text = ":PROPERTIES:\n:TOOLS: read\n:TOOLS+: write\n:tools+: search\n:END:\n";
        assert_eq!(props(text)[0], pair("TOOLS", "read write search"));
    }

    #[test]
    fn test_plus_without_base_starts_value() {
        let text = ":PROPERTIES:\n:TOOLS+: read\n:END:\n";
        assert_eq!(props(text)[0], pair("TOOLS", "read"));
    }

    #[test]
    fn test_repeated_key_kept_twice() {
        let text = ":PROPERTIES:\n:NAME: a\n:NAME: b\n:END:\n";
        let props = props(text);
        assert_eq!(&props[..2], [pair("NAME", "a"), pair("NAME", "b")]);
    }

    #[test]
    fn test_crlf_lines() {
        let text = ":PROPERTIES:\r\n:NAME: x\r\n:END:\r\nbody\r\n";
        assert_eq!(props(text)[0], pair("NAME", "x"));
    }

    #[test]
    fn test_stray_line_means_no_drawer() {
        let text = ":PROPERTIES:\nnot a property\n:NAME: x\n:END:\n";
        assert!(OrgEngine.property_span(text, 0).is_none());
        assert!(props(text).is_empty());
    }

    #[test]
    fn test_blank_line_inside_drawer_means_no_drawer() {
        let text = ":PROPERTIES:\n:NAME: x\n\n:MODEL: y\n:END:\n";
        assert!(OrgEngine.property_span(text, 0).is_none());
    }

    #[test]
    fn test_empty_drawer_is_a_drawer() {
        let span = OrgEngine.property_span(":PROPERTIES:\n:END:\n", 0).unwrap();
        assert_eq!(span.start, span.end);
    }
}
