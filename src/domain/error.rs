//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the orbit map rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed orbit '{line}': {reason}")]
    MalformedLine { line: String, reason: &'static str },

    #[error("body names must not be empty")]
    EmptyName,

    #[error("body already in orbit map: {name} (new parent: {parent})")]
    DuplicateBody { name: String, parent: String },

    #[error(
        "unresolvable parent(s): {} ({pending} orbit(s) could not be attached)",
        parents.join(", ")
    )]
    UnresolvableParent { parents: Vec<String>, pending: usize },

    #[error("body not found: {0}")]
    NotFound(String),

    #[error("no transfer path between {from} and {to}: distance {distance} is below 2")]
    NoTransferPath {
        from: String,
        to: String,
        distance: usize,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
