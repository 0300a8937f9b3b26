//! Serve command - static file server over the output directory

use color_eyre::eyre::{Result, WrapErr};
use leaflet_core::Config;
use tokio::net::TcpListener;

use crate::server::create_router;

/// Run the serve command.
///
/// Blocks until the server stops; only returns on error.
pub async fn run(config: &Config) -> Result<()> {
    let output_dir = &config.build.output_dir;
    let addr = config.serve.addr();
    tracing::info!(output = %output_dir.display(), %addr, "Starting file server");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("error starting server on {addr}"))?;

    println!("  check: http://localhost:{}", config.serve.port);
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, create_router(output_dir))
        .await
        .wrap_err("error starting server")?;

    Ok(())
}
