//! Integration tests for Settings loading with layered merge semantics.
//!
//! These tests only write local config files inside temp directories; they
//! assume no global config or `BSTCHECK_*` variables override the fields
//! under test.

use std::fs;

use tempfile::TempDir;

use bstcheck::application::ApplicationError;
use bstcheck::config::{local_config_path, RenderStyle, Settings};
use bstcheck::domain::TokenMode;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".bstcheck.toml"),
        "strict_tokens = true\n\n[render]\nstyle = \"sideways\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert!(settings.strict_tokens);
    assert_eq!(settings.token_mode(), TokenMode::Strict);
    assert_eq!(settings.render.style, RenderStyle::Sideways);
    assert_eq!(settings.render.max_edges, 10, "unspecified field keeps default");
}

#[test]
fn given_no_local_config_when_load_then_succeeds() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path()));

    assert!(settings.is_ok());
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let project = TempDir::new().unwrap();
    let path = local_config_path(project.path());
    fs::write(&path, "strict_tokens = [unterminated\n").unwrap();

    let err = Settings::load(Some(project.path())).unwrap_err();

    match err {
        ApplicationError::Config { message } => {
            assert!(message.contains(".bstcheck.toml"), "got: {message}")
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_unknown_render_style_when_load_file_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstcheck.toml");
    fs::write(&path, "[render]\nstyle = \"fancy\"\n").unwrap();

    let result = Settings::load_file(&path);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_partial_file_when_load_file_then_merges_onto_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstcheck.toml");
    fs::write(&path, "[render]\nmax_edges = 3\n").unwrap();

    let settings = Settings::load_file(&path).unwrap();

    assert!(!settings.strict_tokens);
    assert_eq!(settings.render.style, RenderStyle::Tree);
    assert_eq!(settings.render.max_edges, 3);
}

#[test]
fn given_written_template_when_load_file_then_equals_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstcheck.toml");
    fs::write(&path, Settings::template()).unwrap();

    assert_eq!(Settings::load_file(&path).unwrap(), Settings::default());
}
