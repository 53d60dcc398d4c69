//! Professor persistence
//!
//! [`ProfessorStore`] is the seam the services depend on.
//! [`DocumentProfessorStore`] backs it with the `professors` collection of
//! the document store.

use serde_json::{Map, Value};

use super::model::{Professor, ProfessorDetails};
use crate::document::{DocumentStore, StoreFuture, StoreResult, UpdateOutcome};
use crate::identifier::ObjectId;
use crate::reviews::Review;

/// Collection holding professor documents
pub const PROFESSORS: &str = "professors";

const REVIEWS_FIELD: &str = "reviews";
const OVERALL_RATING_FIELD: &str = "overallRating";

/// Operations over professor documents.
///
/// Every mutating call is a single independent write. Nothing here spans
/// more than one document.
pub trait ProfessorStore: Send + Sync {
    fn find_by_id(&self, id: ObjectId) -> StoreFuture<'_, Option<Professor>>;

    /// The professor whose `reviews` contains `review_id`
    fn find_by_review_id(&self, review_id: ObjectId) -> StoreFuture<'_, Option<Professor>>;

    fn list(&self) -> StoreFuture<'_, Vec<Professor>>;

    fn insert(&self, professor: Professor) -> StoreFuture<'_, ()>;

    fn update_details(
        &self,
        id: ObjectId,
        details: ProfessorDetails,
    ) -> StoreFuture<'_, UpdateOutcome>;

    /// Append to `reviews`
    fn push_review(&self, id: ObjectId, review: Review) -> StoreFuture<'_, UpdateOutcome>;

    /// Remove the review `review_id` from `reviews`
    fn pull_review(&self, id: ObjectId, review_id: ObjectId) -> StoreFuture<'_, UpdateOutcome>;

    /// Overwrite the cached aggregate; `None` stores `null`
    fn set_overall_rating(
        &self,
        id: ObjectId,
        rating: Option<f64>,
    ) -> StoreFuture<'_, UpdateOutcome>;

    /// Returns whether the professor existed
    fn delete(&self, id: ObjectId) -> StoreFuture<'_, bool>;
}

/// [`ProfessorStore`] over a [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct DocumentProfessorStore {
    store: DocumentStore,
}

impl DocumentProfessorStore {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

fn decode(doc: Value) -> StoreResult<Professor> {
    Ok(serde_json::from_value(doc)?)
}

fn rating_value(rating: Option<f64>) -> Value {
    rating
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

impl ProfessorStore for DocumentProfessorStore {
    fn find_by_id(&self, id: ObjectId) -> StoreFuture<'_, Option<Professor>> {
        Box::pin(async move { self.store.find_one(PROFESSORS, id)?.map(decode).transpose() })
    }

    fn find_by_review_id(&self, review_id: ObjectId) -> StoreFuture<'_, Option<Professor>> {
        Box::pin(async move {
            self.store
                .find_one_by_element(PROFESSORS, REVIEWS_FIELD, review_id)?
                .map(decode)
                .transpose()
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Professor>> {
        Box::pin(async move {
            self.store
                .find_all(PROFESSORS)?
                .into_iter()
                .map(decode)
                .collect::<StoreResult<Vec<_>>>()
        })
    }

    fn insert(&self, professor: Professor) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let doc = serde_json::to_value(&professor)?;
            self.store.insert_one(PROFESSORS, doc).map(|_| ())
        })
    }

    fn update_details(
        &self,
        id: ObjectId,
        details: ProfessorDetails,
    ) -> StoreFuture<'_, UpdateOutcome> {
        Box::pin(async move {
            let fields: Map<String, Value> = match serde_json::to_value(&details)? {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            self.store.set_fields(PROFESSORS, id, fields)
        })
    }

    fn push_review(&self, id: ObjectId, review: Review) -> StoreFuture<'_, UpdateOutcome> {
        Box::pin(async move {
            let element = serde_json::to_value(&review)?;
            self.store.push(PROFESSORS, id, REVIEWS_FIELD, element)
        })
    }

    fn pull_review(&self, id: ObjectId, review_id: ObjectId) -> StoreFuture<'_, UpdateOutcome> {
        Box::pin(async move { self.store.pull(PROFESSORS, id, REVIEWS_FIELD, review_id) })
    }

    fn set_overall_rating(
        &self,
        id: ObjectId,
        rating: Option<f64>,
    ) -> StoreFuture<'_, UpdateOutcome> {
        Box::pin(async move {
            let mut fields = Map::new();
            fields.insert(OVERALL_RATING_FIELD.to_string(), rating_value(rating));
            self.store.set_fields(PROFESSORS, id, fields)
        })
    }

    fn delete(&self, id: ObjectId) -> StoreFuture<'_, bool> {
        Box::pin(async move { self.store.delete_one(PROFESSORS, id) })
    }
}
