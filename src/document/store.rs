//! Collection storage and single-document primitives

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use crate::identifier::ObjectId;

/// Primary key field of every document and nested array element
pub const ID_FIELD: &str = "_id";

/// Result of a single-document write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// A document with the given id existed
    pub matched: bool,
    /// The document changed
    pub modified: bool,
}

impl UpdateOutcome {
    fn missing() -> Self {
        Self::default()
    }

    fn applied(modified: bool) -> Self {
        Self {
            matched: true,
            modified,
        }
    }
}

/// Documents of one collection, ordered by id
#[derive(Debug, Default, Clone)]
struct Collection {
    documents: BTreeMap<ObjectId, Value>,
}

/// Shared handle to the in-process document database.
///
/// Cloning is cheap; clones address the same collections.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Collection>>> {
        self.collections.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Collection>>> {
        self.collections.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Apply `f` to the document `id` in `collection`, if present
    fn modify<F>(&self, collection: &str, id: ObjectId, f: F) -> StoreResult<UpdateOutcome>
    where
        F: FnOnce(&mut Map<String, Value>) -> StoreResult<bool>,
    {
        let mut collections = self.write()?;
        let doc = match collections
            .get_mut(collection)
            .and_then(|c| c.documents.get_mut(&id))
        {
            Some(doc) => doc,
            None => return Ok(UpdateOutcome::missing()),
        };

        let obj = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::MalformedDocument(format!("{} is not an object", id)))?;
        let modified = f(obj)?;
        Ok(UpdateOutcome::applied(modified))
    }

    /// Insert a document. The document must carry a valid `_id`.
    pub fn insert_one(&self, collection: &str, doc: Value) -> StoreResult<ObjectId> {
        let id = document_id(&doc)?;

        let mut collections = self.write()?;
        let coll = collections.entry(collection.to_string()).or_default();
        if coll.documents.contains_key(&id) {
            return Err(StoreError::DuplicateKey(id));
        }
        coll.documents.insert(id, doc);
        Ok(id)
    }

    /// Fetch a whole document by id
    pub fn find_one(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Value>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.documents.get(&id))
            .cloned())
    }

    /// Fetch every document of a collection, ordered by id
    pub fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|c| c.documents.values().cloned().collect())
            .unwrap_or_default())
    }

    /// Fetch the first document whose array `field` holds an element with
    /// `_id == element_id`
    pub fn find_one_by_element(
        &self,
        collection: &str,
        field: &str,
        element_id: ObjectId,
    ) -> StoreResult<Option<Value>> {
        let needle = element_id.to_hex();
        let collections = self.read()?;
        Ok(collections.get(collection).and_then(|c| {
            c.documents
                .values()
                .find(|doc| {
                    doc.get(field)
                        .and_then(Value::as_array)
                        .map(|items| items.iter().any(|item| element_matches(item, &needle)))
                        .unwrap_or(false)
                })
                .cloned()
        }))
    }

    /// Overwrite top-level fields of one document
    pub fn set_fields(
        &self,
        collection: &str,
        id: ObjectId,
        fields: Map<String, Value>,
    ) -> StoreResult<UpdateOutcome> {
        if fields.contains_key(ID_FIELD) {
            return Err(StoreError::MalformedDocument(
                "_id cannot be updated".to_string(),
            ));
        }
        self.modify(collection, id, |obj| {
            let mut modified = false;
            for (key, value) in fields {
                if obj.get(&key) != Some(&value) {
                    obj.insert(key, value);
                    modified = true;
                }
            }
            Ok(modified)
        })
    }

    /// Append `element` to the array `field` of one document
    pub fn push(
        &self,
        collection: &str,
        id: ObjectId,
        field: &str,
        element: Value,
    ) -> StoreResult<UpdateOutcome> {
        self.modify(collection, id, |obj| {
            let slot = obj
                .entry(field.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            let items = slot.as_array_mut().ok_or_else(|| {
                StoreError::MalformedDocument(format!("{} of {} is not an array", field, id))
            })?;
            items.push(element);
            Ok(true)
        })
    }

    /// Remove every element with `_id == element_id` from the array `field`
    pub fn pull(
        &self,
        collection: &str,
        id: ObjectId,
        field: &str,
        element_id: ObjectId,
    ) -> StoreResult<UpdateOutcome> {
        let needle = element_id.to_hex();
        self.modify(collection, id, |obj| {
            let Some(items) = obj.get_mut(field).and_then(Value::as_array_mut) else {
                return Ok(false);
            };
            let before = items.len();
            items.retain(|item| !element_matches(item, &needle));
            Ok(items.len() != before)
        })
    }

    /// Delete one document. Returns whether it existed.
    pub fn delete_one(&self, collection: &str, id: ObjectId) -> StoreResult<bool> {
        let mut collections = self.write()?;
        Ok(collections
            .get_mut(collection)
            .map(|c| c.documents.remove(&id).is_some())
            .unwrap_or(false))
    }

    #[cfg(test)]
    fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|c| c.documents.len())
            .unwrap_or(0))
    }
}

fn document_id(doc: &Value) -> StoreResult<ObjectId> {
    let raw = doc
        .as_object()
        .ok_or_else(|| StoreError::MalformedDocument("document is not an object".to_string()))?
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::MalformedDocument("missing _id".to_string()))?;
    ObjectId::parse(raw).map_err(|e| StoreError::MalformedDocument(e.to_string()))
}

fn element_matches(item: &Value, needle: &str) -> bool {
    item.get(ID_FIELD).and_then(Value::as_str) == Some(needle)
}
