//! Build orchestration.
//!
//! Runs the build steps in order: copy static assets, render the document,
//! write it into the output directory. The first failing step aborts the
//! build; nothing already written is rolled back.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use leaflet_core::config::BuildConfig;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    copy::{CopyError, CopyStats, copy_dir},
    render::{DocumentRenderer, RenderError, RenderedDocument},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Copying static assets failed.
    #[error("error copying directory: {0}")]
    Copy(#[from] CopyError),

    /// The markdown document could not be read.
    #[error("error reading markdown file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendering the document failed.
    #[error("error rendering document: {0}")]
    Render(#[from] RenderError),

    /// The rendered document could not be written.
    #[error("error writing output file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// What the asset copy produced.
    pub assets: CopyStats,

    /// Path of the rendered document, if one was written.
    pub document: Option<PathBuf>,

    /// Title of the rendered document.
    pub title: Option<String>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: BuildConfig,
    renderer: DocumentRenderer,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            renderer: DocumentRenderer::new(),
        }
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            static_dir = %self.config.static_dir.display(),
            output = %self.config.output_dir.display(),
            "starting build"
        );

        // 1. Copy static assets
        stats.assets = copy_dir(&self.config.static_dir, &self.config.output_dir)?;

        // 2. Render and write the document
        if let Some(content) = self.config.content_path() {
            let document = self.render_document(content)?;
            let output = self.config.output_path();
            self.write_document(&document, &output)?;
            stats.title = Some(document.title);
            stats.document = Some(output);
        } else {
            debug!("no content file configured, skipping render");
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            files = stats.assets.files,
            document = ?stats.document,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Read, convert and lay out the content file.
    fn render_document(&self, content: &Path) -> Result<RenderedDocument> {
        let markdown = fs::read(content).map_err(|e| BuildError::ReadInput {
            path: content.to_path_buf(),
            source: e,
        })?;

        let document = self
            .renderer
            .render(&markdown, content, self.config.layout_path())?;
        debug!(title = %document.title, bytes = document.html.len(), "rendered document");
        Ok(document)
    }

    /// Write the rendered document, replacing any file already there.
    fn write_document(&self, document: &RenderedDocument, output: &Path) -> Result<()> {
        fs::write(output, document.as_bytes()).map_err(|e| BuildError::WriteOutput {
            path: output.to_path_buf(),
            source: e,
        })?;
        info!(path = %output.display(), "wrote document");
        Ok(())
    }
}
