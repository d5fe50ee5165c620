//! Flattening contract source maps into compilation-scoped records.

use crate::input::SourceMapInput;
use crate::model::Contract;

/// One record per present source map, in contract order.
///
/// Within a contract the creation map (against `db.createBytecode`) comes
/// before the deployed map (against `db.callBytecode`). Missing or empty
/// maps produce nothing.
pub fn source_map_inputs(contracts: &[Contract]) -> Vec<SourceMapInput> {
    contracts.iter().flat_map(contract_source_maps).collect()
}

fn contract_source_maps(contract: &Contract) -> Vec<SourceMapInput> {
    let create = present(&contract.source_map).map(|data| SourceMapInput {
        bytecode: contract.db.create_bytecode.clone(),
        data: data.to_string(),
    });
    let deployed = present(&contract.deployed_source_map).map(|data| SourceMapInput {
        bytecode: contract.db.call_bytecode.clone(),
        data: data.to_string(),
    });

    create.into_iter().chain(deployed).collect()
}

fn present(map: &Option<String>) -> Option<&str> {
    map.as_deref().filter(|data| !data.is_empty())
}
