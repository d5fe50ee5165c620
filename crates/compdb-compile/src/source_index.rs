//! Positional alignment of sources to a compilation's canonical order.

use crate::input::{AstInput, ProcessedSourceInput};
use crate::model::Source;
use compdb_kernel::{IdObject, Sources};
use std::collections::HashMap;

/// Align `sources` to `source_indexes`.
///
/// Slot `i` holds the source whose `source_path` equals `source_indexes[i]`,
/// or `None` if there is none. Matching is exact string equality; when several
/// sources share a path the first one in `sources` wins. The result always has
/// `source_indexes.len()` slots.
pub fn resolve_source_indexes<'a>(
    source_indexes: &[String],
    sources: &'a [Source],
) -> Vec<Option<&'a Source>> {
    let mut by_path: HashMap<&str, &'a Source> = HashMap::with_capacity(sources.len());
    for source in sources {
        by_path.entry(source.source_path.as_str()).or_insert(source);
    }

    source_indexes
        .iter()
        .map(|path| by_path.get(path.as_str()).copied())
        .collect()
}

/// `{source, ast, language}` per canonical slot.
pub fn processed_source_inputs(
    source_indexes: &[String],
    sources: &[Source],
) -> Vec<Option<ProcessedSourceInput>> {
    resolve_source_indexes(source_indexes, sources)
        .into_iter()
        .map(|slot| {
            slot.map(|source| ProcessedSourceInput {
                source: source.db.source.clone(),
                ast: source.ast.as_ref().and_then(AstInput::from_value),
                language: source.language.clone(),
            })
        })
        .collect()
}

/// Bare source id per canonical slot.
pub fn source_inputs(
    source_indexes: &[String],
    sources: &[Source],
) -> Vec<Option<IdObject<Sources>>> {
    resolve_source_indexes(source_indexes, sources)
        .into_iter()
        .map(|slot| slot.map(|source| source.db.source.clone()))
        .collect()
}
