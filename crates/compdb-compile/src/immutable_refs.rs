//! Flattening immutable-reference tables into compilation-scoped records.

use crate::error::CompileError;
use crate::input::ImmutableReferenceInput;
use crate::model::Contract;

/// One record per AST-node key, across every contract that declares any.
///
/// `length` comes from the first offset recorded for the key; the others are
/// assumed to match and are not checked. `offsets` lists every `start`.
/// Records follow contract order, then key order within the contract.
///
/// A key with no offsets is malformed compiler output and fails the whole
/// call with [`CompileError::EmptyImmutableOffsets`].
pub fn immutable_reference_inputs(
    contracts: &[Contract],
) -> Result<Vec<ImmutableReferenceInput>, CompileError> {
    let mut out = Vec::new();
    for contract in contracts
        .iter()
        .filter(|contract| !contract.immutable_references.is_empty())
    {
        for (ast_node, offsets) in contract.immutable_references.iter() {
            let first = offsets
                .first()
                .ok_or_else(|| CompileError::EmptyImmutableOffsets {
                    source_path: contract.source_path.clone(),
                    ast_node: ast_node.to_string(),
                })?;

            out.push(ImmutableReferenceInput {
                ast_node: ast_node.to_string(),
                bytecode: contract.db.create_bytecode.clone(),
                length: first.length,
                offsets: offsets.iter().map(|offset| offset.start).collect(),
            });
        }
    }
    Ok(out)
}
