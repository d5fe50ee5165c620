//! Raw compiler output, as handed over by the compile orchestration.
//!
//! These records are read-only here. Each already carries the ids assigned
//! by earlier persistence passes (`db.source`, `db.callBytecode`, ...).
//! Fields this crate does not interpret are kept in `extra` and written back
//! unchanged, so an entry survives a parse/serialize round trip intact.

use crate::db::DbNamespace;
use compdb_kernel::{Bytecodes, IdObject, Sources};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Compiler descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compiler {
    pub name: String,
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One compilation: everything a single compiler run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationEntry {
    pub compiler: Compiler,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    /// Canonical source order for this compilation.
    #[serde(default)]
    pub source_indexes: Vec<String>,
    #[serde(default, skip_serializing_if = "DbNamespace::is_empty")]
    pub db: DbNamespace,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One compiled file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub source_path: String,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast: Option<Value>,
    #[serde(rename = "legacyAST", default, skip_serializing_if = "Option::is_none")]
    pub legacy_ast: Option<Value>,
    pub db: SourceDb,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDb {
    pub source: IdObject<Sources>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One compiled contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contract_name: String,
    pub source_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_source_map: Option<String>,
    #[serde(default)]
    pub immutable_references: ImmutableReferences,
    pub db: ContractDb,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDb {
    pub source: IdObject<Sources>,
    pub call_bytecode: IdObject<Bytecodes>,
    pub create_bytecode: IdObject<Bytecodes>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One occurrence of an immutable value inside deployed bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableOffset {
    pub start: u64,
    pub length: u64,
}

/// AST-node key → occurrences, in the order the compiler emitted them.
///
/// A repeated key keeps its first position and takes the later value.
pub type ImmutableReferences = IndexMap<String, Vec<ImmutableOffset>>;
