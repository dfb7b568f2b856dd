//! Outline documents with a leading property drawer.
//!
//! - [`engine`]: the outline engine seam and the Org implementation
//! - [`parser`]: key normalization, validation, and body extraction

pub mod engine;
pub mod parser;

pub use engine::{OrgEngine, OutlineEngine, PropertySpan};
pub use parser::{OutlineParser, parse_outline_file, parse_outline_str};
