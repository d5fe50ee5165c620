//! Collection tags.
//!
//! `Collection` is the runtime tag sent to loaders. The zero-sized marker
//! types carry the same tag at the type level so an `IdObject<Sources>` can
//! never be handed where an `IdObject<Bytecodes>` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A persisted resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Sources,
    Bytecodes,
    Compilations,
    Contracts,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Sources,
        Collection::Bytecodes,
        Collection::Compilations,
        Collection::Contracts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sources => "sources",
            Self::Bytecodes => "bytecodes",
            Self::Compilations => "compilations",
            Self::Contracts => "contracts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.as_str() == s)
            .ok_or_else(|| {
                format!("unknown collection `{s}` (expected sources, bytecodes, compilations, or contracts)")
            })
    }
}

/// Type-level tag for one collection.
pub trait Resource: Send + Sync + 'static {
    const COLLECTION: Collection;
}

/// Marker for `sources`.
#[derive(Debug)]
pub enum Sources {}

/// Marker for `bytecodes`.
#[derive(Debug)]
pub enum Bytecodes {}

/// Marker for `compilations`.
#[derive(Debug)]
pub enum Compilations {}

/// Marker for `contracts`.
#[derive(Debug)]
pub enum Contracts {}

impl Resource for Sources {
    const COLLECTION: Collection = Collection::Sources;
}

impl Resource for Bytecodes {
    const COLLECTION: Collection = Collection::Bytecodes;
}

impl Resource for Compilations {
    const COLLECTION: Collection = Collection::Compilations;
}

impl Resource for Contracts {
    const COLLECTION: Collection = Collection::Contracts;
}
