//! Static file server for the generated site

use std::path::Path;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the file server router.
///
/// Every path falls through to a [`ServeDir`] rooted at `output_dir`, so
/// missing files are 404 and directories serve their `index.html`.
pub fn create_router(output_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(output_dir))
        .layer(TraceLayer::new_for_http())
}
