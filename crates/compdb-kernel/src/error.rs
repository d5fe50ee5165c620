//! Errors raised at the resource-loader seam.

use crate::collection::Collection;

/// Failure of one `load` call. Always fatal for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A record could not be turned into JSON before loading.
    #[error("failed to serialize {collection} record: {reason}")]
    Serialize {
        collection: Collection,
        reason: String,
    },

    /// The loader broke the one-id-per-record contract.
    #[error("{collection} loader returned {actual} id(s) for {expected} record(s)")]
    LengthMismatch {
        collection: Collection,
        expected: usize,
        actual: usize,
    },

    /// The loader refused the batch.
    #[error("{collection} load rejected: {reason}")]
    Rejected {
        collection: Collection,
        reason: String,
    },

    /// The loader is gone (task ended, channel closed).
    #[error("loader unavailable: {0}")]
    Unavailable(String),

    /// Backing storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}
