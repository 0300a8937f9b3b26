//! Leaflet Generator Library
//!
//! Static site generation engine for Leaflet.
//!
//! # Modules
//!
//! - [`copy`] - Recursive static asset copying
//! - [`template`] - HTML layout templates with `{{ Name }}` placeholders
//! - [`render`] - Markdown document rendering with optional layout
//! - [`build`] - Build orchestration

pub mod build;
pub mod copy;
pub mod render;
pub mod template;

pub use build::{BuildError, BuildStats, Builder};
pub use copy::{CopyError, CopyStats, copy_dir};
pub use render::{DocumentRenderer, RenderError, RenderedDocument};
pub use template::{Template, TemplateContext, TemplateError};
