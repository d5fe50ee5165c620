//! # compdb-compile
//!
//! Normalization of raw compiler output into `compilations` records.
//!
//! A compilation arrives as three independently ordered collections:
//! sources, contracts, and the canonical `sourceIndexes` path list. This
//! crate correlates them by source path and flattens per-contract data into
//! compilation-scoped arrays:
//!
//! ```text
//! CompilationEntry
//!     ├─ resolve_source_indexes ──→ processedSources[], sources[]   (positional, gaps allowed)
//!     ├─ source_map_inputs ───────→ sourceMaps[]                    (create before deployed)
//!     └─ immutable_reference_inputs → immutableReferences[]         (one per AST node)
//!                     │
//!                     ▼
//!             CompilationInput
//! ```
//!
//! Everything here is pure. Loading the record is the batch crate's job.

pub mod builder;
pub mod db;
pub mod entries;
pub mod error;
pub mod immutable_refs;
pub mod input;
pub mod model;
pub mod source_index;
pub mod source_maps;

pub use builder::{CompilationParts, to_compilation_input};
pub use db::{DbDelta, DbNamespace};
pub use entries::{read_entries, read_entries_from_path, write_entries_to_path};
pub use error::CompileError;
pub use immutable_refs::immutable_reference_inputs;
pub use input::{
    AstInput, CompilationInput, ImmutableReferenceInput, ProcessedSourceInput, SourceMapInput,
};
pub use model::{
    CompilationEntry, Compiler, Contract, ContractDb, ImmutableOffset, ImmutableReferences,
    Source, SourceDb,
};
pub use source_index::{processed_source_inputs, resolve_source_indexes, source_inputs};
pub use source_maps::source_map_inputs;
