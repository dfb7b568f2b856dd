//! Frontmatter and outline property-block extraction.
//!
//! This crate turns agent definition documents into a uniform
//! [`ParsedDocument`](agentmeta_core::ParsedDocument): validated metadata
//! keys plus the body text under the reserved `system` key.
//!
//! # Modules
//!
//! - [`frontmatter`]: `---` delimited key-value blocks
//!   - [`frontmatter::decoder`]: markup decoding seam (YAML by default)
//!   - [`frontmatter::parser`]: block location and validation
//! - [`outline`]: documents with a leading property drawer
//!   - [`outline::engine`]: outline engine seam (Org by default)
//!   - [`outline::parser`]: key normalization and validation
//! - [`agent`]: format detection and typed agent definitions
//! - [`text`]: line and body-text helpers
//!
//! # Example
//!
//! ```rust
//! use agentmeta_content::{parse_frontmatter_str, parse_outline_str};
//! use agentmeta_core::MetaKey;
//! use std::path::Path;
//!
//! let md = "---\nname: coder\n---\nWrite code.\n";
//! let doc = parse_frontmatter_str(md, Path::new("coder.md"), None).unwrap().unwrap();
//! assert_eq!(doc.get_str(&MetaKey::NAME), Some("coder"));
//!
//! let org = ":PROPERTIES:\n:NAME: coder\n:END:\nWrite code.\n";
//! let doc = parse_outline_str(org, Path::new("coder.org"), None).unwrap().unwrap();
//! assert_eq!(doc.system(), "Write code.");
//! ```

pub mod agent;
pub mod frontmatter;
pub mod outline;
pub mod text;

mod fields;

// Re-export commonly used types
pub use agent::{
    AgentDefinition, DocumentFormat, detect_format, load_agent, load_agents_dir,
    parse_agent_file, parse_document_str,
};
pub use frontmatter::{
    FrontmatterParser, MarkupDecoder, YamlDecoder, parse_frontmatter_file, parse_frontmatter_str,
};
pub use outline::{
    OrgEngine, OutlineEngine, OutlineParser, PropertySpan, parse_outline_file, parse_outline_str,
};
