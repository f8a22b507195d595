//! Application-level errors (wraps domain errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("line {line_no}: {source}")]
    Line {
        line_no: usize,
        #[source]
        source: DomainError,
    },

    #[error("{context}: orbit map is not valid UTF-8")]
    InvalidEncoding {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("orbit map not found: {0}")]
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

impl ApplicationError {
    /// True when the error stems from the orbit map content rather than the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::Line { .. } | Self::InvalidEncoding { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
