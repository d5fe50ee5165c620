//! # compdb-batch
//!
//! Drives normalized records through a resource loader in batches.
//!
//! - `BatchProcess`: the extract → process → convert contract for one pass
//! - `run_batch` / `run_batches`: the engine, all-or-nothing per batch
//! - `CompilationsPass`: the `compilations` pass over `CompilationEntry`
//! - `ChannelLoader`: a loader running on its own task behind a channel
//!
//! The only suspension point in a batch is the single loader call made by
//! `process`. Extract and convert are plain functions.

pub mod channel;
pub mod compilations;
pub mod error;
pub mod pipeline;

pub use channel::{ChannelLoader, DEFAULT_CHANNEL_CAPACITY, LoadRequest, spawn_loader};
pub use compilations::{
    COMPILATION_KEY, CompilationsPass, load_compilations, load_compilations_batched,
};
pub use error::BatchError;
pub use pipeline::{BatchProcess, run_batch, run_batches};
