//! Batch failures. Any of these aborts the whole batch.

use compdb_compile::CompileError;
use compdb_kernel::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// `extract` rejected an entry.
    #[error("entry {index}: {source}")]
    Extract {
        index: usize,
        #[source]
        source: CompileError,
    },

    /// The loader failed; the error is passed through unchanged.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// `process` answered with the wrong number of results.
    #[error("process returned {actual} result(s) for {expected} entr(y/ies)")]
    ResultCount { expected: usize, actual: usize },
}
