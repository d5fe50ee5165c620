//! Errors raised while normalizing compiler output.

/// Upstream data broke a precondition the normalizer relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// An immutable-reference key was declared with no offsets.
    #[error("immutable reference `{ast_node}` in {source_path} has no offsets")]
    EmptyImmutableOffsets {
        source_path: String,
        ast_node: String,
    },
}
