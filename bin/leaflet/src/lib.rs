//! Leaflet CLI Library
//!
//! This library provides the core functionality for the Leaflet static site generator CLI.
//! It is used by the binary entry point and kept separate so the commands
//! can be tested without spawning a process.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, serve)
//! - [`server`] - Static file server over the output directory
//!
//! # Example
//!
//! ```no_run
//! use leaflet::{Config, cmd};
//!
//! let config = Config::default();
//! cmd::build::run(&config).unwrap();
//! ```

pub mod cmd;
pub mod server;

use color_eyre::eyre::Report;
// Re-export core types for convenience
pub use leaflet_core::Config;
pub use leaflet_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// One-line description of an error and its causes.
///
/// Causes already spelled out by the message before them are skipped, since
/// most library errors embed their source in their own message.
pub fn error_message(err: &Report) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}
