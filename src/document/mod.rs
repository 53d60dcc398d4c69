//! # Document Store
//!
//! In-process document database: named collections of JSON documents keyed
//! by [`ObjectId`](crate::identifier::ObjectId).
//!
//! Every primitive operation touches exactly one document and holds the
//! collection lock only for its own duration. There are no multi-document
//! transactions; callers composing several writes see each one land
//! independently.

mod errors;
mod store;

use futures_util::future::BoxFuture;

pub use errors::{StoreError, StoreResult};
pub use store::{DocumentStore, UpdateOutcome, ID_FIELD};

/// Future returned by the typed store traits built on this module.
///
/// Each call is one suspension point for the caller.
pub type StoreFuture<'a, T> = BoxFuture<'a, StoreResult<T>>;
