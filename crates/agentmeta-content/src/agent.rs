//! Agent definitions read from either document format.
//!
//! The format is detected from content alone: a leading `---` line selects
//! frontmatter, a leading property drawer selects the outline parser.
//!
//! # Example
//!
//! ```rust
//! use agentmeta_content::agent::{AgentDefinition, DocumentFormat, detect_format};
//! use agentmeta_content::parse_frontmatter_str;
//! use std::path::Path;
//!
//! let content = "---\nname: reviewer\ntools: [read]\n---\nReview carefully.\n";
//! assert_eq!(detect_format(content), Some(DocumentFormat::Frontmatter));
//!
//! let doc = parse_frontmatter_str(content, Path::new("reviewer.md"), None)
//!     .unwrap()
//!     .unwrap();
//! let agent = AgentDefinition::try_from(&doc).unwrap();
//! assert_eq!(agent.name, "reviewer");
//! assert_eq!(agent.tools, ["read"]);
//! assert_eq!(agent.system_prompt, "Review carefully.");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use agentmeta_core::{Error, KeyValidator, MetaKey, MetaValue, ParsedDocument, Result};
use serde::Serialize;
use serde_yaml::Value;

use crate::frontmatter::{is_delimiter, parse_frontmatter_str};
use crate::outline::{OrgEngine, OutlineEngine, parse_outline_str};
use crate::text;

/// The metadata block style a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// `---` delimited key-value markup.
    Frontmatter,
    /// Leading outline property drawer.
    Outline,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Frontmatter => f.write_str("frontmatter"),
            DocumentFormat::Outline => f.write_str("outline"),
        }
    }
}

/// Detect which metadata block, if any, a document starts with.
pub fn detect_format(content: &str) -> Option<DocumentFormat> {
    let starts_with_delimiter = text::lines(content)
        .next()
        .is_some_and(|first| is_delimiter(first.text));
    if starts_with_delimiter {
        Some(DocumentFormat::Frontmatter)
    } else if OrgEngine.property_span(content, 0).is_some() {
        Some(DocumentFormat::Outline)
    } else {
        None
    }
}

/// Parse in-memory content with whichever parser its format calls for.
pub fn parse_document_str(
    content: &str,
    origin: &Path,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<ParsedDocument>> {
    match detect_format(content) {
        Some(DocumentFormat::Frontmatter) => parse_frontmatter_str(content, origin, validator),
        Some(DocumentFormat::Outline) => parse_outline_str(content, origin, validator),
        None => {
            log::debug!("No metadata block in {}", origin.display());
            Ok(None)
        }
    }
}

/// Read a file and parse it with whichever parser its content calls for.
pub fn parse_agent_file(
    path: impl AsRef<Path>,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<ParsedDocument>> {
    let path = path.as_ref();
    let content = text::read_document(path)?;
    parse_document_str(&content, path, validator)
}

/// A typed agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentDefinition {
    /// Agent name.
    pub name: String,
    /// One-line description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capabilities the agent may use.
    pub tools: Vec<String>,
    /// Backend the agent runs on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Model identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The document body.
    pub system_prompt: String,
}

impl AgentDefinition {
    /// Build a definition, naming it after the file stem when `name` is unset.
    pub fn from_document(doc: &ParsedDocument, path: &Path) -> Result<Self> {
        let fallback = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(String::from);
        Self::build(doc, fallback)
    }

    fn build(doc: &ParsedDocument, fallback_name: Option<String>) -> Result<Self> {
        let name = text_field(doc, &MetaKey::NAME)?
            .or(fallback_name)
            .ok_or_else(|| Error::invalid_field("name", "missing"))?;

        Ok(Self {
            name,
            description: text_field(doc, &MetaKey::DESCRIPTION)?,
            tools: tools_field(doc)?,
            backend: text_field(doc, &MetaKey::BACKEND)?,
            model: text_field(doc, &MetaKey::MODEL)?,
            system_prompt: doc.system().to_string(),
        })
    }
}

impl TryFrom<&ParsedDocument> for AgentDefinition {
    type Error = Error;

    fn try_from(doc: &ParsedDocument) -> Result<Self> {
        Self::build(doc, None)
    }
}

fn text_field(doc: &ParsedDocument, key: &MetaKey) -> Result<Option<String>> {
    match doc.get(key) {
        None => Ok(None),
        Some(MetaValue::Text(text)) => Ok(Some(text.clone())),
        Some(MetaValue::Decoded(Value::Number(n))) => Ok(Some(n.to_string())),
        Some(MetaValue::Decoded(Value::Bool(b))) => Ok(Some(b.to_string())),
        Some(MetaValue::Decoded(Value::Null)) => Ok(None),
        Some(_) => Err(Error::invalid_field(key.as_str(), "expected text")),
    }
}

fn tools_field(doc: &ParsedDocument) -> Result<Vec<String>> {
    match doc.get(&MetaKey::TOOLS) {
        None | Some(MetaValue::Decoded(Value::Null)) => Ok(Vec::new()),
        Some(MetaValue::List(items)) => Ok(items.clone()),
        Some(MetaValue::Text(text)) => Ok(text.split_whitespace().map(String::from).collect()),
        Some(MetaValue::Decoded(_)) => Err(Error::invalid_field(
            MetaKey::TOOLS.as_str(),
            "expected a list of tool names",
        )),
    }
}

/// Read and type a single agent file.
pub fn load_agent(
    path: impl AsRef<Path>,
    validator: Option<&dyn KeyValidator>,
) -> Result<Option<AgentDefinition>> {
    let path = path.as_ref();
    parse_agent_file(path, validator)?
        .map(|doc| AgentDefinition::from_document(&doc, path))
        .transpose()
}

/// Load every agent defined directly inside `dir`, sorted by file name.
///
/// Files without a metadata block are skipped; the first failing file
/// aborts the load.
pub fn load_agents_dir(
    dir: impl AsRef<Path>,
    validator: Option<&dyn KeyValidator>,
) -> Result<Vec<(PathBuf, AgentDefinition)>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io_with_path(e, dir))? {
        let entry = entry.map_err(|e| Error::io_with_path(e, dir))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io_with_path(e, entry.path()))?;
        if file_type.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut agents = Vec::new();
    for path in paths {
        match load_agent(&path, validator)? {
            Some(agent) => agents.push((path, agent)),
            None => log::debug!("Skipping {}: no metadata block", path.display()),
        }
    }
    log::debug!("Loaded {} agents from {}", agents.len(), dir.display());
    Ok(agents)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use agentmeta_core::AllowList;
    use std::collections::BTreeMap;
    use std::fs;

    fn doc_with(entries: &[(MetaKey, MetaValue)], body: &str) -> ParsedDocument {
        let fields: BTreeMap<_, _> = entries.iter().cloned().collect();
        ParsedDocument::from_fields(fields, body)
    }

    // ------------------------------------------------------------------------
    // Format detection
    // ------------------------------------------------------------------------

    #[test]
    fn test_detect_frontmatter() {
        assert_eq!(detect_format("---\nname: x\n---\n"), Some(DocumentFormat::Frontmatter));
        assert_eq!(detect_format("---\n"), Some(DocumentFormat::Frontmatter));
    }

    #[test]
    fn test_detect_outline() {
        let content = "# comment\n:PROPERTIES:\n:NAME: x\n:END:\n";
        assert_eq!(detect_format(content), Some(DocumentFormat::Outline));
    }

    #[test]
    fn test_detect_nothing() {
        assert_eq!(detect_format("plain text"), None);
        assert_eq!(detect_format(""), None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(DocumentFormat::Outline.to_string(), "outline");
    }

    #[test]
    fn test_parse_document_str_dispatches() {
        let origin = Path::new("a");
        let fm = parse_document_str("---\nname: a\n---\nA", origin, None).unwrap().unwrap();
        assert_eq!(fm.system(), "A");

        let org = parse_document_str(":PROPERTIES:\n:NAME: b\n:END:\nB", origin, None)
            .unwrap()
            .unwrap();
        assert_eq!(org.get_str(&MetaKey::NAME), Some("b"));

        assert!(parse_document_str("nothing", origin, None).unwrap().is_none());
    }

    #[test]
    fn test_parse_document_str_propagates_errors() {
        let err = parse_document_str("---\nname: a\n", Path::new("a"), None).unwrap_err();
        assert!(matches!(err, Error::MalformedBlock { .. }));
    }

    // ------------------------------------------------------------------------
    // AgentDefinition
    // ------------------------------------------------------------------------

    #[test]
    fn test_agent_from_full_document() {
        let doc = doc_with(
            &[
                (MetaKey::NAME, "coder".into()),
                (MetaKey::DESCRIPTION, "Writes code".into()),
                (MetaKey::TOOLS, MetaValue::tokens("read write")),
                (MetaKey::BACKEND, "local".into()),
                (MetaKey::MODEL, "opus".into()),
            ],
            "You write code.",
        );
        let agent = AgentDefinition::try_from(&doc).unwrap();

        assert_eq!(
            agent,
            AgentDefinition {
                name: "coder".into(),
                description: Some("Writes code".into()),
                tools: vec!["read".into(), "write".into()],
                backend: Some("local".into()),
                model: Some("opus".into()),
                system_prompt: "You write code.".into(),
            }
        );
    }

    #[test]
    fn test_agent_requires_name() {
        let err = AgentDefinition::try_from(&doc_with(&[], "body")).unwrap_err();
        assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_agent_name_falls_back_to_file_stem() {
        let agent =
            AgentDefinition::from_document(&doc_with(&[], ""), Path::new("dir/planner.md")).unwrap();
        assert_eq!(agent.name, "planner");
        assert!(agent.tools.is_empty());
    }

    #[test]
    fn test_agent_numeric_model_rendered() {
        let doc = doc_with(
            &[
                (MetaKey::NAME, "x".into()),
                (MetaKey::MODEL, MetaValue::Decoded(serde_yaml::from_str("4").unwrap())),
            ],
            "",
        );
        assert_eq!(AgentDefinition::try_from(&doc).unwrap().model.as_deref(), Some("4"));
    }

    #[test]
    fn test_agent_rejects_structured_text_field() {
        let doc = doc_with(
            &[
                (MetaKey::NAME, "x".into()),
                (MetaKey::DESCRIPTION, MetaValue::tokens("a b")),
            ],
            "",
        );
        let err = AgentDefinition::try_from(&doc).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_agent_rejects_structured_tools() {
        let doc = doc_with(
            &[
                (MetaKey::NAME, "x".into()),
                (MetaKey::TOOLS, MetaValue::Decoded(serde_yaml::from_str("{a: 1}").unwrap())),
            ],
            "",
        );
        assert!(AgentDefinition::try_from(&doc).is_err());
    }

    #[test]
    fn test_agent_serializes_without_empty_options() {
        let agent = AgentDefinition::try_from(&doc_with(&[(MetaKey::NAME, "x".into())], "p")).unwrap();
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "x", "tools": [], "system_prompt": "p"})
        );
    }

    // ------------------------------------------------------------------------
    // Directory loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_agents_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.org"), ":PROPERTIES:\n:TOOLS: grep\n:END:\nOrg agent\n").unwrap();
        fs::write(dir.path().join("a.md"), "---\nname: alpha\n---\nMarkdown agent\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "no header here\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let agents = load_agents_dir(dir.path(), None).unwrap();
        let names: Vec<_> = agents.iter().map(|(_, a)| a.name.as_str()).collect();
        assert_eq!(names, ["alpha", "b"]);
        assert_eq!(agents[1].1.tools, ["grep"]);
        assert_eq!(agents[1].1.system_prompt, "Org agent");
    }

    #[test]
    fn test_load_agents_dir_stops_on_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.md"), "---\ncolor: red\n---\n").unwrap();

        let err = load_agents_dir(dir.path(), None).unwrap_err();
        assert_eq!(err.invalid_key_name(), Some("color"));

        let permissive = AllowList::default().with_key("color");
        let agents = load_agents_dir(dir.path(), Some(&permissive)).unwrap();
        assert_eq!(agents[0].1.name, "bad");
    }

    #[test]
    fn test_load_agents_dir_missing() {
        let err = load_agents_dir("/no/such/dir", None).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
