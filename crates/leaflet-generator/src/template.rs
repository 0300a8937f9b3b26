//! HTML layout templates.
//!
//! Provides a lightweight template system using string interpolation rather than
//! heavy template engines like Tera or Handlebars. Placeholders are written as
//! `{{ Name }}`; a leading dot (`{{ .Name }}`) is accepted so Go-style layouts
//! work unchanged, and a trailing `?` marks a placeholder as optional.

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;

/// Placeholder for the document title.
pub const TITLE_VAR: &str = "Title";

/// Placeholder for the converted document HTML.
pub const CONTENT_VAR: &str = "Content";

/// Template errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read.
    #[error("failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A `{{` without a matching `}}`.
    #[error("template {template}: unclosed {{{{ delimiter at byte {offset}")]
    UnclosedDelimiter { template: String, offset: usize },

    /// A `{{ }}` with nothing inside.
    #[error("template {template}: empty placeholder at byte {offset}")]
    EmptyPlaceholder { template: String, offset: usize },

    /// Missing required variable at render time.
    #[error("template {template}: missing required variable: {name}")]
    MissingVariable { template: String, name: String },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable { name: String, optional: bool },
}

/// A parsed layout template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template source.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut pos = 0;

        while let Some(rel) = source[pos..].find("{{") {
            let start = pos + rel;
            if start > pos {
                segments.push(Segment::Literal(source[pos..start].to_string()));
            }

            let inner_start = start + 2;
            let Some(len) = source[inner_start..].find("}}") else {
                return Err(TemplateError::UnclosedDelimiter {
                    template: name,
                    offset: start,
                });
            };

            let raw = source[inner_start..inner_start + len].trim();
            let (raw, optional) = match raw.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (raw, false),
            };
            let var = raw.strip_prefix('.').unwrap_or(raw);
            if var.is_empty() {
                return Err(TemplateError::EmptyPlaceholder {
                    template: name,
                    offset: start,
                });
            }

            segments.push(Segment::Variable {
                name: var.to_string(),
                optional,
            });
            pos = inner_start + len + 2;
        }

        if pos < source.len() {
            segments.push(Segment::Literal(source[pos..].to_string()));
        }

        Ok(Self { name, segments })
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| TemplateError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(path.display().to_string(), &source)
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Values are inserted verbatim.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable { name, optional } => match context.get(name) {
                    Some(value) => out.push_str(value),
                    None if *optional => {}
                    None => {
                        return Err(TemplateError::MissingVariable {
                            template: self.name.clone(),
                            name: name.clone(),
                        });
                    }
                },
            }
        }

        Ok(out)
    }
}
