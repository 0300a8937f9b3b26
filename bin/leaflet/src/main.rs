//! Leaflet CLI
//!
//! Copies static assets, renders one markdown page, and optionally serves the result.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use leaflet::Config;

/// Command-line interface for Leaflet.
#[derive(Parser)]
#[command(
    name = "leaflet",
    version,
    about = "A minimal static site generator"
)]
struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "leaflet.toml")]
    config: PathBuf,

    /// Serve the output directory over HTTP after building
    #[arg(long)]
    serve: bool,

    /// Port for --serve (overrides serve.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    leaflet::init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        println!("{}", leaflet::error_message(&err));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(&cli.config).wrap_err("error loading configuration")?;

    if let Some(port) = cli.port {
        tracing::info!(port, "Overriding serve port from CLI");
        config.serve.port = port;
    }

    tracing::debug!(?config, "Loaded configuration");

    leaflet::cmd::build::run(&config)?;

    if cli.serve {
        leaflet::cmd::serve::run(&config).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["leaflet"]);

        assert_eq!(cli.config, PathBuf::from("leaflet.toml"));
        assert!(!cli.serve);
        assert!(cli.port.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_serve_flag() {
        let cli = Cli::parse_from(["leaflet", "--serve"]);
        assert!(cli.serve);
    }

    #[test]
    fn test_cli_port_override() {
        let cli = Cli::parse_from(["leaflet", "--serve", "--port", "3000"]);
        assert_eq!(cli.port, Some(3000));
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["leaflet", "-vvv"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli = Cli::parse_from(["leaflet", "--config", "site.toml"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_cli_help_is_an_early_exit() {
        let err = Cli::try_parse_from(["leaflet", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["leaflet", "--port", "99999"]).is_err());
    }
}
