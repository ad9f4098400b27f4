//! ValidationService and ServiceContainer against an in-memory filesystem

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bstcheck::application::ApplicationError;
use bstcheck::config::Settings;
use bstcheck::domain::{DomainError, ErrorKind};
use bstcheck::infrastructure::traits::FileSystem;
use bstcheck::infrastructure::ServiceContainer;
use bstcheck::util::testing;

#[derive(Default)]
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not in memory"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

fn container(settings: Settings, fs: MemoryFileSystem) -> ServiceContainer {
    testing::init_test_setup();
    ServiceContainer::with_deps(settings, Arc::new(fs))
}

#[test]
fn given_edge_file_when_checking_then_tokens_are_read_from_text() {
    // Arrange
    let fs = MemoryFileSystem::default().with_file(
        "/data/edges.txt",
        "[(2,1), (4,2),\n (7,5), (4,7), (7,9)]\n",
    );
    let container = container(Settings::default(), fs);

    // Act
    let report = container
        .validation
        .check_file(Path::new("/data/edges.txt"))
        .unwrap();

    // Assert
    assert!(report.is_valid());
    assert_eq!(report.edges.len(), 5);
    assert_eq!(
        report.tree().map(|t| t.values()),
        Some(vec![1, 2, 4, 5, 7, 9])
    );
}

#[test]
fn given_missing_file_when_checking_then_input_not_found() {
    let container = container(Settings::default(), MemoryFileSystem::default());

    let err = container
        .validation
        .check_file(Path::new("/data/missing.txt"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::InputNotFound(path) if path == Path::new("/data/missing.txt")));
}

#[test]
fn given_strict_settings_when_checking_spaced_token_then_malformed() {
    let settings = Settings {
        strict_tokens: true,
        ..Settings::default()
    };
    let fs = MemoryFileSystem::default().with_file("/data/edges.txt", "(2,1) (2, 3)");
    let container = container(settings, fs);

    let report = container
        .validation
        .check_file(Path::new("/data/edges.txt"))
        .unwrap();

    assert_eq!(report.kind(), Some(ErrorKind::MalformedToken));
    assert!(report.tree().is_none());
}

#[test]
fn given_lenient_settings_when_checking_spaced_token_then_skipped() {
    let fs = MemoryFileSystem::default().with_file("/data/edges.txt", "(2,1) (2, 3)");
    let container = container(Settings::default(), fs);

    let report = container
        .validation
        .check_file(Path::new("/data/edges.txt"))
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report.skipped, vec!["(2, 3)".to_string()]);
}

#[test]
fn given_invalid_tree_when_checking_then_reason_is_reported() {
    let container = container(Settings::default(), MemoryFileSystem::default());

    let report = container
        .validation
        .check_tokens(&["(2,1)", "(2,3)", "(12,2)", "(2,5)"])
        .unwrap();

    assert!(!report.is_valid());
    assert!(matches!(
        report.outcome,
        Err(DomainError::DuplicateChildSlot { conflicting: 5, .. })
    ));
    assert_eq!(
        report.reason().as_deref(),
        Some("node 2 already has a right child (3), but another right child (5) was found")
    );
}

#[test]
fn given_builtin_cases_when_checking_then_only_duplicate_slot_case_fails() {
    let container = container(Settings::default(), MemoryFileSystem::default());

    let verdicts: Vec<bool> = bstcheck::application::builtin_cases()
        .iter()
        .map(|case| container.validation.check_tokens(case.tokens).unwrap().is_valid())
        .collect();

    assert_eq!(verdicts, vec![true, true, false, true]);
}

#[test]
fn given_invalid_tree_in_file_when_checking_then_verdict_is_in_report_not_error() {
    let fs = MemoryFileSystem::default().with_file("/data/edges.txt", "(3,3) (3,5)");
    let container = container(Settings::default(), fs);

    let report = container
        .validation
        .check_file(Path::new("/data/edges.txt"))
        .expect("an invalid tree is a verdict, not a failure");

    assert_eq!(report.kind(), Some(ErrorKind::EqualParentChild));
    assert_eq!(report.input, vec!["(3,3)".to_string(), "(3,5)".to_string()]);
}
