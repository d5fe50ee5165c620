//! Assembling the normalized compilation record.

use crate::error::CompileError;
use crate::immutable_refs::immutable_reference_inputs;
use crate::input::CompilationInput;
use crate::model::{CompilationEntry, Compiler, Contract, Source};
use crate::source_index::{processed_source_inputs, source_inputs};
use crate::source_maps::source_map_inputs;

/// Borrowed view of the parts of an entry the builder needs.
#[derive(Debug, Clone, Copy)]
pub struct CompilationParts<'a> {
    pub compiler: &'a Compiler,
    pub source_indexes: &'a [String],
    pub sources: &'a [Source],
    pub contracts: &'a [Contract],
}

impl<'a> From<&'a CompilationEntry> for CompilationParts<'a> {
    fn from(entry: &'a CompilationEntry) -> Self {
        Self {
            compiler: &entry.compiler,
            source_indexes: &entry.source_indexes,
            sources: &entry.sources,
            contracts: &entry.contracts,
        }
    }
}

/// Build the `compilations` record for one compilation.
pub fn to_compilation_input(
    parts: CompilationParts<'_>,
) -> Result<CompilationInput, CompileError> {
    Ok(CompilationInput {
        compiler: parts.compiler.clone(),
        processed_sources: processed_source_inputs(parts.source_indexes, parts.sources),
        sources: source_inputs(parts.source_indexes, parts.sources),
        source_maps: source_map_inputs(parts.contracts),
        immutable_references: immutable_reference_inputs(parts.contracts)?,
    })
}

impl CompilationEntry {
    /// Normalize this entry into its `compilations` record.
    pub fn to_compilation_input(&self) -> Result<CompilationInput, CompileError> {
        to_compilation_input(self.into())
    }
}
