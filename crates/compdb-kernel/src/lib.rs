//! # compdb-kernel
//!
//! Resource identity for the compdb persistence layer.
//!
//! Every persisted record lives in a collection and is referred to by an
//! opaque identifier handed back by whatever loader stored it. This crate
//! owns those notions and nothing else:
//!
//! ```text
//! Collection            ← sources | bytecodes | compilations | contracts
//!     │
//! Resource (marker)     ← type-level tag per collection
//!     │
//! IdObject<K>           ← { "id": ... } reference into collection K
//!     │
//! ResourceLoader        ← async seam: records in, ids out, order preserved
//! ```
//!
//! Content hashing and the JSONL substrate live here too so that loaders,
//! stores, and tests agree on how a record maps to its identifier and how
//! rows land on disk.

pub mod collection;
pub mod error;
pub mod hash;
pub mod id;
pub mod jsonl;
pub mod loader;

pub use collection::{Bytecodes, Collection, Compilations, Contracts, Resource, Sources};
pub use error::LoadError;
pub use hash::{ContentHash, canonical_json_bytes};
pub use id::IdObject;
pub use jsonl::{JsonlError, read_rows, read_rows_from_path, write_rows, write_rows_to_path};
pub use loader::{ResourceLoader, load_resources};
