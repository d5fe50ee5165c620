//! The `compilations` pass.

use crate::error::BatchError;
use crate::pipeline::{BatchProcess, run_batch, run_batches};
use async_trait::async_trait;
use compdb_compile::{CompilationEntry, CompilationInput, CompileError, DbDelta};
use compdb_kernel::{Compilations, IdObject, LoadError, ResourceLoader, load_resources};
use tracing::debug;

/// Key this pass writes under each entry's `db` namespace.
pub const COMPILATION_KEY: &str = "compilation";

/// Loads one `compilations` record per entry and records its id on the entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilationsPass;

#[async_trait]
impl BatchProcess for CompilationsPass {
    type Entry = CompilationEntry;
    type Record = CompilationInput;
    type Resource = Compilations;
    type Output = CompilationEntry;

    fn extract(&self, entry: &CompilationEntry) -> Result<CompilationInput, CompileError> {
        entry.to_compilation_input()
    }

    async fn process(
        &self,
        records: Vec<CompilationInput>,
        loader: &dyn ResourceLoader,
    ) -> Result<Vec<IdObject<Compilations>>, LoadError> {
        debug!(records = records.len(), "loading compilations");
        load_resources::<Compilations, _>(loader, &records).await
    }

    fn convert(&self, entry: &CompilationEntry, id: IdObject<Compilations>) -> CompilationEntry {
        CompilationEntry {
            db: entry.db.apply(DbDelta::id(COMPILATION_KEY, &id)),
            ..entry.clone()
        }
    }
}

/// Load `entries` as a single batch.
pub async fn load_compilations(
    loader: &dyn ResourceLoader,
    entries: &[CompilationEntry],
) -> Result<Vec<CompilationEntry>, BatchError> {
    run_batch(&CompilationsPass, loader, entries).await
}

/// Load `entries` in batches of at most `batch_size`.
pub async fn load_compilations_batched(
    loader: &dyn ResourceLoader,
    entries: &[CompilationEntry],
    batch_size: usize,
) -> Result<Vec<CompilationEntry>, BatchError> {
    run_batches(&CompilationsPass, loader, entries, batch_size).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdb_compile::{Compiler, DbNamespace, Source, SourceDb};
    use compdb_kernel::Collection;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Scripted {
        answer: Vec<&'static str>,
        fail: bool,
        seen: Mutex<Vec<(Collection, Vec<Value>)>>,
    }

    #[async_trait]
    impl ResourceLoader for Scripted {
        async fn load(
            &self,
            collection: Collection,
            records: Vec<Value>,
        ) -> Result<Vec<String>, LoadError> {
            self.seen.lock().expect("lock").push((collection, records));
            if self.fail {
                return Err(LoadError::Storage("disk full".into()));
            }
            Ok(self.answer.iter().map(|s| s.to_string()).collect())
        }
    }

    fn entry(path: &str, source_id: &str, db: Value) -> CompilationEntry {
        CompilationEntry {
            compiler: Compiler {
                name: "solc".into(),
                version: "0.8.0".into(),
                extra: Default::default(),
            },
            sources: vec![Source {
                source_path: path.into(),
                contents: String::new(),
                language: "Solidity".into(),
                ast: None,
                legacy_ast: None,
                db: SourceDb {
                    source: IdObject::new(source_id),
                    extra: Default::default(),
                },
                extra: Default::default(),
            }],
            contracts: vec![],
            source_indexes: vec![path.into()],
            db: serde_json::from_value::<DbNamespace>(db).expect("db should parse"),
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn merges_assigned_id_into_existing_db() {
        let loader = Scripted {
            answer: vec!["c1"],
            ..Scripted::default()
        };
        let entries = vec![entry("A.sol", "s1", json!({"contracts": [{"id": "k1"}]}))];

        let out = load_compilations(&loader, &entries).await.expect("load");

        assert_eq!(
            serde_json::to_value(&out[0].db).expect("serialize"),
            json!({"contracts": [{"id": "k1"}], "compilation": {"id": "c1"}})
        );
        assert_eq!(out[0].sources, entries[0].sources);
        assert!(!entries[0].db.contains_key(COMPILATION_KEY));
    }

    #[tokio::test]
    async fn sends_normalized_records_in_entry_order() {
        let loader = Scripted {
            answer: vec!["c1", "c2"],
            ..Scripted::default()
        };
        let entries = vec![
            entry("A.sol", "s1", json!({})),
            entry("B.sol", "s2", json!({})),
        ];

        let out = load_compilations(&loader, &entries).await.expect("load");

        let seen = loader.seen.lock().expect("lock");
        assert_eq!(seen.len(), 1, "one loader call per batch");
        assert_eq!(seen[0].0, Collection::Compilations);
        assert_eq!(seen[0].1[0]["sources"], json!([{"id": "s1"}]));
        assert_eq!(seen[0].1[1]["sources"], json!([{"id": "s2"}]));

        let assigned: Vec<Option<IdObject<Compilations>>> = out
            .iter()
            .map(|e| e.db.get(COMPILATION_KEY))
            .collect();
        let expected: Vec<Option<IdObject<Compilations>>> =
            vec![Some(IdObject::new("c1")), Some(IdObject::new("c2"))];
        assert_eq!(assigned, expected);
    }

    #[tokio::test]
    async fn enriched_entry_keeps_fields_it_does_not_interpret() {
        let loader = Scripted {
            answer: vec!["c1"],
            ..Scripted::default()
        };
        let raw = json!({
            "compiler": {
                "name": "solc",
                "version": "0.8.0",
                "settings": {"evmVersion": "paris"}
            },
            "sourceIndexes": ["A.sol"],
            "contracts": [{
                "contractName": "A",
                "sourcePath": "A.sol",
                "abi": [{"type": "constructor"}],
                "db": {
                    "source": {"id": "s1"},
                    "callBytecode": {"id": "b1"},
                    "createBytecode": {"id": "b2"},
                    "contract": {"id": "k1"}
                }
            }],
            "db": {"sources": [{"id": "s1"}], "bytecodes": [{"id": "b1"}]},
            "project": {"id": "p1"}
        });
        let entry: CompilationEntry = serde_json::from_value(raw.clone()).expect("parse");
        let entries = vec![entry];

        let out = load_compilations(&loader, &entries).await.expect("load");
        let enriched = serde_json::to_value(&out[0]).expect("serialize");

        assert_eq!(enriched["compiler"], raw["compiler"]);
        assert_eq!(enriched["contracts"][0]["abi"], raw["contracts"][0]["abi"]);
        assert_eq!(enriched["contracts"][0]["db"]["contract"], json!({"id": "k1"}));
        assert_eq!(enriched["project"], json!({"id": "p1"}));
        let db_keys: Vec<&str> = out[0].db.keys().collect();
        assert_eq!(db_keys, vec!["sources", "bytecodes", COMPILATION_KEY]);
    }

    #[tokio::test]
    async fn record_ast_keeps_document_key_order() {
        let loader = Scripted {
            answer: vec!["c1"],
            ..Scripted::default()
        };
        let mut with_ast = entry("A.sol", "s1", json!({}));
        with_ast.sources[0].ast = Some(
            serde_json::from_str(r#"{"nodeType":"SourceUnit","id":1,"absolutePath":"A.sol"}"#)
                .expect("ast should parse"),
        );

        load_compilations(&loader, &[with_ast]).await.expect("load");

        let seen = loader.seen.lock().expect("lock");
        assert_eq!(
            seen[0].1[0]["processedSources"][0]["ast"]["json"],
            json!(r#"{"nodeType":"SourceUnit","id":1,"absolutePath":"A.sol"}"#)
        );
    }

    #[tokio::test]
    async fn loader_failure_propagates_unchanged() {
        let loader = Scripted {
            fail: true,
            ..Scripted::default()
        };
        let entries = vec![entry("A.sol", "s1", json!({}))];

        let err = load_compilations(&loader, &entries)
            .await
            .expect_err("loader failure must abort");

        assert_eq!(err, BatchError::Load(LoadError::Storage("disk full".into())));
    }
}
