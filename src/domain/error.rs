//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed tree data or matching rules.
/// They are raised once at construction time, never during a search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("person without a name at: {path}")]
    BlankName { path: String },

    #[error("invalid equivalence rule '{pattern}': {message}")]
    InvalidRule { pattern: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
