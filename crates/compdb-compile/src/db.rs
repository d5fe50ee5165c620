//! The per-entry `db` namespace.
//!
//! Each persistence pass (sources, bytecodes, compilations, contracts)
//! contributes one key. Passes never edit a namespace in place: a pass
//! returns a `DbDelta`, and `DbNamespace::apply` folds it into a new value,
//! leaving every other key untouched.

use compdb_kernel::{IdObject, Resource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ids accumulated for one entry, keyed by the pass that assigned them.
///
/// Keys keep the order they were first written in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbNamespace(IndexMap<String, Value>);

/// One pass's contribution to a `DbNamespace`.
#[derive(Debug, Clone, PartialEq)]
pub struct DbDelta {
    pub key: String,
    pub value: Value,
}

impl DbDelta {
    /// Delta recording an assigned id under `key`.
    pub fn id<K: Resource>(key: impl Into<String>, id: &IdObject<K>) -> Self {
        Self {
            key: key.into(),
            value: serde_json::json!({ "id": id.id() }),
        }
    }
}

impl DbNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read `key` as an id into collection `K`.
    ///
    /// Returns `None` when the key is missing or is not an id object.
    pub fn get<K: Resource>(&self, key: &str) -> Option<IdObject<K>> {
        self.0
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Fold `delta` in, producing a new namespace.
    ///
    /// An existing key keeps its position and takes the new value; a new key
    /// is appended.
    pub fn apply(&self, delta: DbDelta) -> Self {
        let mut next = self.0.clone();
        next.insert(delta.key, delta.value);
        Self(next)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<DbDelta> for DbNamespace {
    fn from_iter<I: IntoIterator<Item = DbDelta>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |namespace, delta| namespace.apply(delta))
    }
}
