//! # compdb-store
//!
//! Reference loader for compdb: an in-memory, content-addressed store that
//! implements `ResourceLoader`, persisted as JSONL.
//!
//! ```text
//! JSONL (on disk, one {collection, id, record} row per line)
//!     ↕  open / save
//! MemoryResourceStore (collection → id → record)
//! ```
//!
//! It applies one policy the batch pipeline leaves to the
//! loader: identical records collapse onto one id.

pub mod memory;

pub use memory::{MemoryResourceStore, StoreError, StoredResource};
