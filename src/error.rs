//! Service Error Types
//!
//! Unified error handling for the professor, user and review services.
//!
//! - `Validation`: bad input, raised before any store is touched
//! - `NotFound`: a user, professor or review is absent; may follow a
//!   partial write (see [`ReviewCoordinator::add_review`](crate::reviews::ReviewCoordinator::add_review))
//! - `Store`: the document store itself failed

use std::fmt;

use thiserror::Error;

use crate::document::StoreError;
use crate::identifier::IdentifierError;

/// Service result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Kinds of documents a lookup can miss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Professor,
    Review,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Professor => "professor",
            Resource::Review => "review",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier failed the codec
    #[error("invalid {field}: {source}")]
    InvalidIdentifier {
        field: &'static str,
        #[source]
        source: IdentifierError,
    },

    /// Empty after trimming
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// Longer than allowed, in characters
    #[error("{field} must be at most {max} characters, got {len}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Rating outside the fixed range
    #[error("rating must be an integer between {min} and {max}, got {value}")]
    RatingOutOfRange { value: i64, min: u8, max: u8 },

    /// Any other format violation
    #[error("{field} is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },
}

/// Service error
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(Resource),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: Resource) -> Self {
        Self::NotFound(resource)
    }

    /// Whether this is a validation failure (no store was touched)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Get error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "PROFRATE_VALIDATION_ERROR",
            Self::NotFound(_) => "PROFRATE_NOT_FOUND",
            Self::Store(_) => "PROFRATE_STORE_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store(_) => 500,
        }
    }
}
