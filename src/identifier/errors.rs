//! Identifier codec errors

use thiserror::Error;

/// Result type for identifier operations
pub type IdentifierResult<T> = Result<T, IdentifierError>;

/// Reasons an external identifier is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Token is not exactly 24 characters long
    #[error("identifier must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Token contains a character outside `[0-9a-fA-F]`
    #[error("identifier contains non-hex character {0:?}")]
    InvalidCharacter(char),
}

impl IdentifierError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        "PROFRATE_INVALID_IDENTIFIER"
    }
}
