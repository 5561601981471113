//! Document store access.
//!
//! The hosted document database is consumed through [`DocumentStore`], a
//! small capability surface: fetch, create, merge, array-append with
//! de-duplication, and list. [`MemoryDocumentStore`] implements the same
//! semantics in process for tests and the demo CLI.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// The field map of one stored document.
pub type Document = Map<String, Value>;

/// Errors reported by a document store backend.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// The addressed document does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// The backend rejected or failed the operation.
    #[error("document store error: {0}")]
    Backend(String),
}

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document; `None` when absent.
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Create a document under a store-generated id and return that id.
    async fn add_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<String, DocumentStoreError>;

    /// Merge fields into a document, creating it when absent.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), DocumentStoreError>;

    /// Append values to an array field, skipping values already present
    /// (value equality, the store's own union semantics).
    async fn append_to_array(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), DocumentStoreError>;

    /// List every document in a collection.
    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, DocumentStoreError>;
}

/// Serializes a model into a document field map.
///
/// # Errors
///
/// Returns an error when the value does not serialize to a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Deserializes a document field map into a model.
///
/// # Errors
///
/// Returns an error when the fields do not match the target shape.
pub fn from_document<T: DeserializeOwned>(fields: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(fields))
}

/// In-process [`DocumentStore`] with the same merge and array-union
/// semantics as the hosted backend.
///
/// Listing order is by document id, so scans over a collection are
/// deterministic.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<FxHashMap<String, FxHashMap<String, Document>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        MemoryDocumentStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<String, FxHashMap<String, Document>>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self
            .lock()
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn add_document(
        &self,
        collection: &str,
        fields: Document,
    ) -> Result<String, DocumentStoreError> {
        let id = Uuid::now_v7().simple().to_string();

        self.lock()
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), fields);

        Ok(id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), DocumentStoreError> {
        let mut collections = self.lock();
        let document = collections
            .entry(collection.to_owned())
            .or_default()
            .entry(id.to_owned())
            .or_default();

        for (key, value) in fields {
            document.insert(key, value);
        }

        Ok(())
    }

    async fn append_to_array(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), DocumentStoreError> {
        let mut collections = self.lock();
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(id))
            .ok_or_else(|| DocumentStoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })?;

        let entry = document
            .entry(field.to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));

        let Value::Array(items) = entry else {
            return Err(DocumentStoreError::Backend(format!(
                "field {field} of {collection}/{id} is not an array"
            )));
        };

        for value in values {
            if !items.contains(&value) {
                items.push(value);
            }
        }

        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, DocumentStoreError> {
        let mut documents: Vec<(String, Document)> = self
            .lock()
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(id, fields)| (id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        documents.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(documents)
    }
}
