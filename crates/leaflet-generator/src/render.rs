//! Document rendering: frontmatter, markdown conversion and layout.

use std::path::Path;

use leaflet_parser::{MarkdownError, MarkdownParser};
use thiserror::Error;
use tracing::debug;

use crate::template::{CONTENT_VAR, TITLE_VAR, Template, TemplateContext, TemplateError};

/// Document rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Frontmatter or markdown conversion failed.
    #[error(transparent)]
    Markdown(#[from] MarkdownError),

    /// The layout could not be read or parsed.
    #[error("error loading layout: {0}")]
    Layout(#[source] TemplateError),

    /// Layout substitution failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Final output of the render step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Title taken from the frontmatter, empty when absent.
    pub title: String,
    /// Complete HTML, layout applied when one was given.
    pub html: String,
}

impl RenderedDocument {
    /// Bytes to write to disk.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }
}

/// Turns a markdown document into HTML, optionally wrapped in a layout.
#[derive(Debug, Default)]
pub struct DocumentRenderer {
    parser: MarkdownParser,
}

impl DocumentRenderer {
    /// Create a renderer with the default markdown options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `markdown` read from `path`.
    ///
    /// The markdown is converted first and the layout is loaded afterwards,
    /// so a broken document is reported before a broken layout. With a
    /// layout, `Title` and `Content` are substituted into it; without one,
    /// the converted HTML is returned as is.
    pub fn render(
        &self,
        markdown: &[u8],
        path: &Path,
        layout: Option<&Path>,
    ) -> Result<RenderedDocument> {
        let doc = self.parser.parse_bytes(markdown, path)?;
        let title = doc.frontmatter.title;

        let html = match layout {
            Some(layout) => {
                let layout = Template::load(layout).map_err(RenderError::Layout)?;
                debug!(layout = layout.name(), "applying layout");
                let context = TemplateContext::new()
                    .with_var(TITLE_VAR, title.clone())
                    .with_var(CONTENT_VAR, doc.html);
                layout.render(&context)?
            }
            None => doc.html,
        };

        Ok(RenderedDocument { title, html })
    }
}
