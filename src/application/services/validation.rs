//! Edge list validation service
//!
//! Reads edge tokens from arguments, text, or files, and runs the domain
//! builder and validator over them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{self, DomainResult, Edge, ErrorKind, TokenMode, TreeArena};
use crate::infrastructure::traits::FileSystem;

/// Outcome of validating one edge list.
#[derive(Debug)]
pub struct ValidationReport {
    /// Tokens as received, well-formed or not
    pub input: Vec<String>,
    /// Edges that were parsed and fed to the builder, in input order
    pub edges: Vec<Edge>,
    /// Tokens dropped in lenient mode
    pub skipped: Vec<String>,
    /// The built tree, or the first reason it is not a valid BST
    pub outcome: DomainResult<TreeArena>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn tree(&self) -> Option<&TreeArena> {
        self.outcome.as_ref().ok()
    }

    pub fn reason(&self) -> Option<String> {
        self.outcome.as_ref().err().map(|e| e.to_string())
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.outcome.as_ref().err().map(|e| e.kind())
    }
}

/// Service validating edge lists from various sources.
pub struct ValidationService {
    fs: Arc<dyn FileSystem>,
    mode: TokenMode,
}

impl ValidationService {
    /// Create a new validation service.
    pub fn new(fs: Arc<dyn FileSystem>, mode: TokenMode) -> Self {
        Self { fs, mode }
    }

    /// Validate already split `(parent,child)` tokens.
    #[instrument(level = "debug", skip(self, tokens), fields(count = tokens.len()))]
    pub fn check_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> ApplicationResult<ValidationReport> {
        let input: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        let parsed = match domain::parse_edges(tokens, self.mode) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Strict mode: a malformed token is a verdict, not a failure
                debug!("check_tokens: rejected input: {}", e);
                return Ok(ValidationReport {
                    input,
                    edges: Vec::new(),
                    skipped: Vec::new(),
                    outcome: Err(e),
                });
            }
        };

        for token in &parsed.skipped {
            warn!("skipping malformed edge token: {:?}", token);
        }
        debug!(
            "check_tokens: {} edges, {} skipped",
            parsed.edges.len(),
            parsed.skipped.len()
        );

        let outcome = domain::validate(&parsed.edges);
        match &outcome {
            Ok(tree) => debug!("check_tokens: valid BST with {} nodes", tree.len()),
            Err(e) => debug!("check_tokens: invalid ({}): {}", e.kind(), e),
        }

        Ok(ValidationReport {
            input,
            edges: parsed.edges,
            skipped: parsed.skipped,
            outcome,
        })
    }

    /// Validate command line arguments. An argument may hold several tokens,
    /// e.g. `"(2,1), (4,2)"`; one without any parenthesised chunk is kept
    /// whole so it is reported as malformed.
    pub fn check_args<S: AsRef<str>>(&self, args: &[S]) -> ApplicationResult<ValidationReport> {
        let tokens: Vec<&str> = args
            .iter()
            .flat_map(|arg| {
                let arg = arg.as_ref();
                let chunks = domain::tokenize(arg);
                if chunks.is_empty() {
                    vec![arg]
                } else {
                    chunks
                }
            })
            .collect();
        self.check_tokens(tokens.as_slice())
    }

    /// Validate free text such as `[(2,1), (4,2)]`, one or many lines.
    pub fn check_text(&self, text: &str) -> ApplicationResult<ValidationReport> {
        let tokens = domain::tokenize(text);
        debug!("check_text: found {} tokens", tokens.len());
        self.check_tokens(tokens.as_slice())
    }

    /// Validate the edge list stored in a file. `~` and `$VAR` are expanded.
    #[instrument(level = "debug", skip(self))]
    pub fn check_file(&self, path: &Path) -> ApplicationResult<ValidationReport> {
        let path = expand_path(path);
        if !self.fs.exists(&path) {
            return Err(ApplicationError::InputNotFound(path));
        }
        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read edges", &path)?;
        self.check_text(&content)
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}
