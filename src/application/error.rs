//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures to obtain or configure input.
///
/// An edge list that fails validation is not an application error: it is a
/// normal outcome carried by [`ValidationReport`](crate::application::ValidationReport).
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
