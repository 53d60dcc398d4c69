//! Identifier codec
//!
//! Every document in the store is addressed by an [`ObjectId`]: 12 bytes,
//! rendered externally as a 24-character hexadecimal token.
//!
//! Externally supplied identifiers must pass [`validate`] before they are
//! used to address storage. Fresh identifiers come from [`ObjectId::new`].

mod errors;
mod object_id;

pub use errors::{IdentifierError, IdentifierResult};
pub use object_id::ObjectId;

/// Validate a raw external identifier and convert it to an [`ObjectId`].
///
/// Pure function, no side effects.
pub fn validate(raw: &str) -> IdentifierResult<ObjectId> {
    ObjectId::parse(raw)
}
