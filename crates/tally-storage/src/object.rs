use serde::de::DeserializeOwned;
use serde::Serialize;

use tally_keyvalue::{KeyValueStore, KvError};
use tally_types::Validate;

use crate::error::{StorageError, StorageResult};

/// Generic typed repository over any [`KeyValueStore`] backend.
///
/// Works with any record that serializes through serde and checks its own
/// consistency through [`Validate`]. Records are stored as JSON under an
/// opaque query key. Validation runs on both sides of the boundary: before
/// a record is encoded for storage and after one is decoded from it, so
/// malformed data never silently enters or leaves the repository.
pub struct ObjectRepository<S> {
    db: S,
}

impl<S: KeyValueStore> ObjectRepository<S> {
    pub fn new(db: S) -> Self {
        Self { db }
    }

    /// Load the record stored under `query`.
    pub fn load<T>(&self, query: &str) -> StorageResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let raw = self.db.get(query).map_err(|err| match err {
            KvError::NotFound => StorageError::ObjectNotFound,
            other => StorageError::ObjectDatabase(other.to_string()),
        })?;

        let record: T = serde_json::from_slice(&raw)
            .map_err(|err| StorageError::ObjectDecoding(err.to_string()))?;
        record
            .validate()
            .map_err(|err| StorageError::ObjectValidation(err.to_string()))?;

        Ok(record)
    }

    /// Persist `record` under `query`.
    pub fn save<T>(&self, query: &str, record: &T) -> StorageResult<()>
    where
        T: Serialize + Validate,
    {
        record
            .validate()
            .map_err(|err| StorageError::ObjectValidation(err.to_string()))?;

        let raw = serde_json::to_vec(record)
            .map_err(|err| StorageError::ObjectEncoding(err.to_string()))?;

        self.db
            .set(query, &raw)
            .map_err(|err| StorageError::ObjectDatabase(err.to_string()))
    }

    /// Remove the record stored under `query`, if any.
    pub fn delete(&self, query: &str) -> StorageResult<()> {
        self.db
            .del(query)
            .map_err(|err| StorageError::ObjectDatabase(err.to_string()))
    }

    /// Visit every record whose key matches `query`.
    ///
    /// Each matching value is decoded and validated, then handed to
    /// `visit`; returning `true` stops the scan early.
    pub fn scan<T, F>(&self, query: &str, mut visit: F) -> StorageResult<()>
    where
        T: DeserializeOwned + Validate,
        F: FnMut(T) -> bool,
    {
        let mut iter = self
            .db
            .iter(query)
            .map_err(|err| StorageError::ObjectDatabase(err.to_string()))?;

        while iter.has_next() {
            let (_, raw) = iter
                .next_entry()
                .map_err(|err| StorageError::ObjectDatabase(err.to_string()))?;

            let record: T = serde_json::from_slice(&raw)
                .map_err(|err| StorageError::ObjectDecoding(err.to_string()))?;
            record
                .validate()
                .map_err(|err| StorageError::ObjectValidation(err.to_string()))?;

            if visit(record) {
                break;
            }
        }

        Ok(())
    }
}
