//! Build command - copies assets and renders the document

use std::time::Instant;

use color_eyre::eyre::Result;
use leaflet_core::Config;
use leaflet_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Copies the static directory into the output directory and renders the
/// content file into it.
pub fn run(config: &Config) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(build = ?config.build, "Starting build");

    let stats = Builder::new(config.build.clone()).build()?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Assets:     {} files", stats.assets.files);
    if let Some(document) = &stats.document {
        println!("  Document:   {}", document.display());
    }
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", config.build.output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_run_builds_into_output_dir() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("static")).unwrap();
        fs::write(root.path().join("static/app.js"), "1;").unwrap();
        fs::write(root.path().join("post.md"), "---\ntitle: T\n---\nhi").unwrap();

        let mut config = Config::default();
        config.build.static_dir = root.path().join("static");
        config.build.content_file = root.path().join("post.md");
        config.build.layout_file = Default::default();
        config.build.output_dir = root.path().join("out");

        let stats = run(&config).unwrap();

        assert_eq!(stats.assets.files, 1);
        assert_eq!(
            fs::read_to_string(root.path().join("out/index.html")).unwrap(),
            "<p>hi</p>\n"
        );
    }

    #[test]
    fn test_run_reports_copy_failure() {
        let root = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.build.static_dir = root.path().join("static");
        config.build.output_dir = root.path().join("out");

        let err = run(&config).unwrap_err();

        assert!(err.to_string().starts_with("error copying directory"));
    }
}
