//! Delimited metadata blocks ("frontmatter").
//!
//! - [`decoder`]: the key-value markup decoder seam and its YAML implementation
//! - [`parser`]: block location, key validation, and body extraction

pub mod decoder;
pub mod parser;

pub use decoder::{MarkupDecoder, YamlDecoder};
pub use parser::{FrontmatterParser, is_delimiter, parse_frontmatter_file, parse_frontmatter_str};
