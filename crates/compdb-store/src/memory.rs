//! Canonical in-memory resource store.
//!
//! Records are grouped by collection and keyed by the content hash of their
//! canonical JSON. Loading the same record twice yields the same id and
//! keeps a single copy.

use async_trait::async_trait;
use compdb_kernel::{
    Collection, ContentHash, JsonlError, LoadError, ResourceLoader, read_rows_from_path,
    write_rows_to_path,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

type Collections = BTreeMap<Collection, BTreeMap<String, Value>>;

/// Errors raised while loading or saving the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error("{collection} row {actual} does not match its content hash {expected}")]
    IdMismatch {
        collection: Collection,
        expected: String,
        actual: String,
    },
}

/// One persisted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResource {
    pub collection: Collection,
    pub id: String,
    pub record: Value,
}

/// Content-addressed store for every collection.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    collections: Mutex<Collections>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted rows, verifying each id.
    pub fn from_rows(rows: Vec<StoredResource>) -> Result<Self, StoreError> {
        let mut collections = Collections::new();
        for row in rows {
            let expected = ContentHash::of_json(&row.record).0;
            if expected != row.id {
                return Err(StoreError::IdMismatch {
                    collection: row.collection,
                    expected,
                    actual: row.id,
                });
            }
            collections
                .entry(row.collection)
                .or_default()
                .insert(row.id, row.record);
        }
        Ok(Self {
            collections: Mutex::new(collections),
        })
    }

    /// Load store state from a JSONL file.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let rows = read_rows_from_path(path)?;
        Self::from_rows(rows)
    }

    /// Load store state from `path`, or start empty when it does not exist.
    pub fn open_jsonl(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_jsonl(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Persist store state to a JSONL file.
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        write_rows_to_path(path, &self.rows())?;
        Ok(())
    }

    /// Store one record, returning its id.
    pub fn insert(&self, collection: Collection, record: Value) -> String {
        let id = ContentHash::of_json(&record).0;
        self.lock()
            .entry(collection)
            .or_default()
            .entry(id.clone())
            .or_insert(record);
        id
    }

    /// Lookup one record by id.
    pub fn get(&self, collection: Collection, id: &str) -> Option<Value> {
        self.lock()
            .get(&collection)
            .and_then(|records| records.get(id))
            .cloned()
    }

    /// Ids stored in `collection`, in id order.
    pub fn ids(&self, collection: Collection) -> Vec<String> {
        self.lock()
            .get(&collection)
            .map(|records| records.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of stored records across collections.
    pub fn len(&self) -> usize {
        self.lock().values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every row, ordered by collection then id.
    pub fn rows(&self) -> Vec<StoredResource> {
        self.lock()
            .iter()
            .flat_map(|(collection, records)| {
                records.iter().map(|(id, record)| StoredResource {
                    collection: *collection,
                    id: id.clone(),
                    record: record.clone(),
                })
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        // Every mutation is a single map insert, so a poisoned guard is still consistent.
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResourceLoader for MemoryResourceStore {
    async fn load(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<Vec<String>, LoadError> {
        debug!(%collection, records = records.len(), "storing records");
        Ok(records
            .into_iter()
            .map(|record| self.insert(collection, record))
            .collect())
    }
}
