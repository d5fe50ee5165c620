//! Typed identifier references.

use crate::collection::{Collection, Resource};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Reference to one persisted resource in collection `K`.
///
/// On the wire this is `{ "id": "<id>" }`; the collection is known only from
/// the type. Identity is the `id` string and nothing else.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct IdObject<K: Resource> {
    id: String,
    #[serde(skip)]
    kind: PhantomData<fn() -> K>,
}

impl<K: Resource> IdObject<K> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_id(self) -> String {
        self.id
    }

    pub fn collection(&self) -> Collection {
        K::COLLECTION
    }
}

impl<K: Resource> Clone for IdObject<K> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<K: Resource> fmt::Debug for IdObject<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdObject<{}>({:?})", K::COLLECTION, self.id)
    }
}

impl<K: Resource> fmt::Display for IdObject<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", K::COLLECTION, self.id)
    }
}

impl<K: Resource> PartialEq for IdObject<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: Resource> Eq for IdObject<K> {}

impl<K: Resource> PartialOrd for IdObject<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Resource> Ord for IdObject<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<K: Resource> Hash for IdObject<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Bytecodes, Sources};
    use serde_json::json;

    #[test]
    fn serializes_as_bare_id_object() {
        let id: IdObject<Sources> = IdObject::new("s1");
        assert_eq!(serde_json::to_value(&id).expect("serialize"), json!({"id": "s1"}));
    }

    #[test]
    fn deserializes_from_id_object() {
        let id: IdObject<Bytecodes> =
            serde_json::from_value(json!({"id": "b7"})).expect("deserialize");
        assert_eq!(id.id(), "b7");
        assert_eq!(id.collection(), Collection::Bytecodes);
    }

    #[test]
    fn display_includes_collection_tag() {
        let id: IdObject<Bytecodes> = IdObject::new("abc");
        assert_eq!(id.to_string(), "bytecodes:abc");
    }
}
