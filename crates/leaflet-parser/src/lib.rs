//! Leaflet Parser Library
//!
//! Converts markdown documents, with optional YAML frontmatter, into HTML.

pub mod markdown;

pub use markdown::{MarkdownError, MarkdownParser, ParsedDocument, Result};
