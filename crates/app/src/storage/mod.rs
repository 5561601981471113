//! Key-value storage scopes.
//!
//! The browser exposes two independent string stores: a durable scope that
//! survives restarts and a tab scope that survives navigation only. Both
//! are consumed through [`KeyValueStore`]; [`CartStorage`] mirrors the cart
//! across them.

use std::sync::{Mutex, MutexGuard, PoisonError};

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

mod cart_storage;

pub use cart_storage::*;

/// Errors reported while reading or writing a storage scope.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected or failed the operation.
    #[error("storage error: {0}")]
    Backend(String),

    /// The cart could not be serialized for storage.
    #[error("cart payload could not be encoded")]
    Encode(#[source] serde_json::Error),
}

#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`; `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`; absent keys are fine.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process [`KeyValueStore`], one instance per scope.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);

        Ok(())
    }
}
