//! Leaflet Core Library
//!
//! Configuration, frontmatter handling, and error types for the Leaflet static site generator.

pub mod config;
pub mod error;
pub mod frontmatter;

pub use config::Config;
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
