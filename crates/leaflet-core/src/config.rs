//! Site configuration management.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "LEAFLET";

/// Main configuration structure for Leaflet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings.
    #[serde(default)]
    pub serve: ServeConfig,
}

/// Build configuration.
///
/// An empty `content_file` disables the render step, and an empty
/// `layout_file` writes the converted HTML without wrapping it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory of static assets copied verbatim into the output.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Markdown document to render.
    #[serde(default = "default_content_file")]
    pub content_file: PathBuf,

    /// HTML layout wrapping the rendered document.
    #[serde(default = "default_layout_file")]
    pub layout_file: PathBuf,

    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the rendered document inside `output_dir`.
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

/// Development server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_content_file() -> PathBuf {
    PathBuf::from("content/post.md")
}

fn default_layout_file() -> PathBuf {
    PathBuf::from("theme/layout.html")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("rendered")
}

fn default_output_file() -> String {
    "index.html".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            content_file: default_content_file(),
            layout_file: default_layout_file(),
            output_dir: default_output_dir(),
            output_file: default_output_file(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl BuildConfig {
    /// Markdown document to render, if rendering is enabled.
    #[must_use]
    pub fn content_path(&self) -> Option<&Path> {
        non_empty(&self.content_file)
    }

    /// Layout template, if templating is enabled.
    #[must_use]
    pub fn layout_path(&self) -> Option<&Path> {
        non_empty(&self.layout_file)
    }

    /// Full path of the rendered document.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

impl ServeConfig {
    /// Socket address string for binding the server.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(path: &Path) -> Option<&Path> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

impl Config {
    /// Load configuration from an optional TOML file with environment overrides.
    ///
    /// A missing file is not an error: every setting has a default, so the
    /// result is the default configuration plus any `LEAFLET__*` variables.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load from `path`, reading `LEAFLET__*` overrides from `env` instead of
    /// the process environment when it is given.
    fn load_with_env(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading configuration file");
        } else {
            tracing::debug!(path = %path.display(), "configuration file not found, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.build.static_dir.as_os_str().is_empty() {
            return Err(CoreError::config("build.static_dir cannot be empty"));
        }

        if self.build.output_dir.as_os_str().is_empty() {
            return Err(CoreError::config("build.output_dir cannot be empty"));
        }

        let mut components = Path::new(&self.build.output_file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(CoreError::config(format!(
                    "build.output_file must be a plain file name, got '{}'",
                    self.build.output_file
                )));
            }
        }

        if self.build.layout_path().is_some() && self.build.content_path().is_none() {
            tracing::warn!("build.layout_file is set but build.content_file is empty, layout is unused");
        }

        Ok(())
    }
}
