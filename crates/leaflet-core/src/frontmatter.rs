//! Frontmatter parsing for content files.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Line that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

/// Frontmatter metadata for content files.
///
/// Only `title` is recognized. Any other key in the block is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title, empty when absent or null.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of looking for a frontmatter block at the start of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterSplit<'a> {
    /// The document does not open with a delimiter line.
    Absent,
    /// An opening delimiter was found but no closing one.
    Unterminated,
    /// A complete block.
    Block {
        /// Raw text between the delimiter lines.
        frontmatter: &'a str,
        /// Everything after the closing delimiter line.
        body: &'a str,
    },
}

/// Split a document into its frontmatter block and body.
///
/// Delimiters are whole lines consisting of `---` (trailing whitespace and
/// `\r` allowed). The body starts after the line break that ends the closing
/// delimiter.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return FrontmatterSplit::Absent;
    };
    if first.trim_end() != DELIMITER {
        return FrontmatterSplit::Absent;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return FrontmatterSplit::Block {
                frontmatter: &content[start..offset],
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    FrontmatterSplit::Unterminated
}

/// Parse frontmatter from a document, returning it together with the body.
///
/// Documents without frontmatter yield a default record and the whole input
/// as body. `path` is only used for error messages.
pub fn parse_frontmatter<'a>(content: &'a str, path: &Path) -> Result<(Frontmatter, &'a str)> {
    match split_frontmatter(content) {
        FrontmatterSplit::Absent => Ok((Frontmatter::default(), content)),
        FrontmatterSplit::Unterminated => Err(CoreError::frontmatter_unterminated(path)),
        FrontmatterSplit::Block { frontmatter, body } => {
            if frontmatter.trim().is_empty() {
                return Ok((Frontmatter::default(), body));
            }
            let parsed: Frontmatter = serde_yaml::from_str(frontmatter)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            Ok((parsed, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = "---\ntitle: Hello\n---\nBody **text**";

        let FrontmatterSplit::Block { frontmatter, body } = split_frontmatter(content) else {
            panic!("expected a frontmatter block");
        };
        assert_eq!(frontmatter, "title: Hello\n");
        assert_eq!(body, "Body **text**");
    }

    #[test]
    fn test_split_crlf_frontmatter() {
        let content = "---\r\ntitle: Hello\r\n---\r\nBody";

        let FrontmatterSplit::Block { frontmatter, body } = split_frontmatter(content) else {
            panic!("expected a frontmatter block");
        };
        assert_eq!(frontmatter, "title: Hello\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        assert_eq!(
            split_frontmatter("Just some content without frontmatter."),
            FrontmatterSplit::Absent
        );
        assert_eq!(split_frontmatter(""), FrontmatterSplit::Absent);
    }

    #[test]
    fn test_dashes_inside_first_line_are_not_a_delimiter() {
        assert_eq!(
            split_frontmatter("--- not frontmatter\nbody"),
            FrontmatterSplit::Absent
        );
    }

    #[test]
    fn test_unterminated_frontmatter() {
        assert_eq!(
            split_frontmatter("---\ntitle: Hello\nBody"),
            FrontmatterSplit::Unterminated
        );

        let err = parse_frontmatter("---\ntitle: Hello\nBody", Path::new("post.md")).unwrap_err();
        assert!(matches!(err, CoreError::FrontmatterUnterminated { .. }));
    }

    #[test]
    fn test_parse_title() {
        let (fm, body) =
            parse_frontmatter("---\ntitle: Hello\n---\nBody **text**", Path::new("post.md"))
                .expect("parse");

        assert_eq!(fm.title, "Hello");
        assert_eq!(body, "Body **text**");
    }

    #[test]
    fn test_null_title_is_empty() {
        for content in [
            "---\ntitle: ~\n---\nBody",
            "---\ntitle: null\n---\nBody",
            "---\ntitle:\n---\nBody",
        ] {
            let (fm, body) = parse_frontmatter(content, Path::new("post.md")).expect("parse");
            assert_eq!(fm.title, "", "{content:?}");
            assert_eq!(body, "Body");
        }
    }

    #[test]
    fn test_scalar_title_is_kept_as_text() {
        let (fm, _) =
            parse_frontmatter("---\ntitle: 42\n---\nBody", Path::new("post.md")).expect("parse");
        assert_eq!(fm.title, "42");
    }

    #[test]
    fn test_parse_without_frontmatter_has_empty_title() {
        let content = "# Heading\n\nParagraph";
        let (fm, body) = parse_frontmatter(content, Path::new("post.md")).expect("parse");

        assert_eq!(fm.title, "");
        assert_eq!(body, content);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content = r#"---
title: "Test"
date: 2024-01-14
tags: [rust, ssg]
---
Body"#;

        let (fm, body) = parse_frontmatter(content, Path::new("post.md")).expect("parse");
        assert_eq!(fm.title, "Test");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_empty_frontmatter_uses_defaults() {
        let (fm, body) = parse_frontmatter("---\n---\nBody", Path::new("post.md")).expect("parse");
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_malformed_frontmatter() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse_frontmatter(content, Path::new("post.md")).unwrap_err();

        assert!(matches!(err, CoreError::Frontmatter { .. }));
        assert!(err.to_string().contains("post.md"));
    }

    #[test]
    fn test_non_mapping_frontmatter_is_rejected() {
        let content = "---\njust a sentence\n---\nBody";
        let err = parse_frontmatter(content, Path::new("post.md")).unwrap_err();
        assert!(matches!(err, CoreError::Frontmatter { .. }));
    }
}
