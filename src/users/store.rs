//! User persistence

use serde_json::Value;

use super::model::User;
use crate::document::{DocumentStore, StoreFuture, StoreResult, UpdateOutcome};
use crate::identifier::ObjectId;
use crate::reviews::Review;

/// Collection holding user documents
pub const USERS: &str = "users";

const REVIEWS_FIELD: &str = "reviews";

/// Operations over user documents.
///
/// Reviews are only ever appended here; nothing removes the user's copy.
pub trait UserStore: Send + Sync {
    fn find_by_id(&self, id: ObjectId) -> StoreFuture<'_, Option<User>>;

    fn insert(&self, user: User) -> StoreFuture<'_, ()>;

    /// Append to the user's `reviews`
    fn push_review(&self, id: ObjectId, review: Review) -> StoreFuture<'_, UpdateOutcome>;
}

/// [`UserStore`] over a [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct DocumentUserStore {
    store: DocumentStore,
}

impl DocumentUserStore {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

fn decode(doc: Value) -> StoreResult<User> {
    Ok(serde_json::from_value(doc)?)
}

impl UserStore for DocumentUserStore {
    fn find_by_id(&self, id: ObjectId) -> StoreFuture<'_, Option<User>> {
        Box::pin(async move { self.store.find_one(USERS, id)?.map(decode).transpose() })
    }

    fn insert(&self, user: User) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let doc = serde_json::to_value(&user)?;
            self.store.insert_one(USERS, doc).map(|_| ())
        })
    }

    fn push_review(&self, id: ObjectId, review: Review) -> StoreFuture<'_, UpdateOutcome> {
        Box::pin(async move {
            let element = serde_json::to_value(&review)?;
            self.store.push(USERS, id, REVIEWS_FIELD, element)
        })
    }
}
