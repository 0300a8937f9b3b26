//! Error types for the Leaflet core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Leaflet.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or validation error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Frontmatter opened with `---` but never closed.
    #[error("Frontmatter error in {path}: closing delimiter not found")]
    FrontmatterUnterminated { path: PathBuf },

    /// Frontmatter block is not a valid YAML mapping.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new unterminated frontmatter error.
    pub fn frontmatter_unterminated(path: impl Into<PathBuf>) -> Self {
        Self::FrontmatterUnterminated { path: path.into() }
    }
}
