//! End-to-end tests for the `leaflet` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn leaflet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leaflet").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("LEAFLET__BUILD__STATIC_DIR")
        .env_remove("LEAFLET__BUILD__OUTPUT_DIR");
    cmd
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("static/css")).unwrap();
    fs::create_dir_all(dir.path().join("content")).unwrap();
    fs::create_dir_all(dir.path().join("theme")).unwrap();
    fs::write(dir.path().join("static/css/site.css"), "body {}").unwrap();
    fs::write(
        dir.path().join("content/post.md"),
        "---\ntitle: Hello\n---\nBody **text**",
    )
    .unwrap();
    fs::write(
        dir.path().join("theme/layout.html"),
        "<title>{{ .Title }}</title>{{ .Content }}",
    )
    .unwrap();
    dir
}

#[test]
fn test_missing_static_dir_exits_with_message_on_stdout() {
    let dir = TempDir::new().unwrap();

    leaflet(&dir)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "error copying directory: source directory static does not exist",
        ));

    assert!(!dir.path().join("rendered").exists());
}

#[test]
fn test_unterminated_frontmatter_exits_with_message_on_stdout() {
    let dir = site();
    fs::write(dir.path().join("content/post.md"), "---\ntitle: Hello\nBody").unwrap();

    leaflet(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error rendering document"))
        .stdout(predicate::str::contains("closing delimiter not found"));

    assert!(dir.path().join("rendered/css/site.css").exists());
    assert!(!dir.path().join("rendered/index.html").exists());
}

#[test]
fn test_build_succeeds() {
    let dir = site();

    leaflet(&dir).assert().success();

    assert_eq!(
        fs::read_to_string(dir.path().join("rendered/index.html")).unwrap(),
        "<title>Hello</title><p>Body <strong>text</strong></p>\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("rendered/css/site.css")).unwrap(),
        "body {}"
    );
}

#[test]
fn test_env_overrides_output_dir() {
    let dir = site();

    leaflet(&dir)
        .env("LEAFLET__BUILD__OUTPUT_DIR", "dist")
        .assert()
        .success();

    assert!(dir.path().join("dist/index.html").exists());
    assert!(!dir.path().join("rendered").exists());
}

#[test]
fn test_help_exits_zero() {
    let dir = TempDir::new().unwrap();

    leaflet(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--serve"));
}
