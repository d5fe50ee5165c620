//! The three-stage batch protocol.
//!
//! A pass is configured by implementing [`BatchProcess`]:
//!
//! ```text
//! entries ──extract──→ records ──process (one loader call)──→ ids ──convert──→ outputs
//!   (pure, per entry)           (the only suspension point)         (pure, per entry)
//! ```
//!
//! Ids are matched back to entries purely by position. A batch either
//! converts every entry or none of them.

use crate::error::BatchError;
use async_trait::async_trait;
use compdb_compile::CompileError;
use compdb_kernel::{IdObject, LoadError, Resource, ResourceLoader};
use tracing::debug;

/// One persistence pass over a batch of entries.
#[async_trait]
pub trait BatchProcess: Send + Sync {
    type Entry: Send + Sync;
    type Record: Send + Sync;
    type Resource: Resource;
    type Output: Send;

    /// Normalize one entry. Must not suspend.
    fn extract(&self, entry: &Self::Entry) -> Result<Self::Record, CompileError>;

    /// Persist every record of the batch, returning ids in record order.
    async fn process(
        &self,
        records: Vec<Self::Record>,
        loader: &dyn ResourceLoader,
    ) -> Result<Vec<IdObject<Self::Resource>>, LoadError>;

    /// Merge the assigned id back into the entry. Must not suspend.
    fn convert(&self, entry: &Self::Entry, id: IdObject<Self::Resource>) -> Self::Output;
}

/// Run one batch through `pass`.
///
/// `process` is called exactly once, or not at all for an empty batch.
pub async fn run_batch<P: BatchProcess>(
    pass: &P,
    loader: &dyn ResourceLoader,
    entries: &[P::Entry],
) -> Result<Vec<P::Output>, BatchError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let records = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            pass.extract(entry)
                .map_err(|source| BatchError::Extract { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let collection = <P::Resource as Resource>::COLLECTION;
    debug!(%collection, entries = entries.len(), "processing batch");
    let ids = pass.process(records, loader).await?;
    if ids.len() != entries.len() {
        return Err(BatchError::ResultCount {
            expected: entries.len(),
            actual: ids.len(),
        });
    }

    Ok(entries
        .iter()
        .zip(ids)
        .map(|(entry, id)| pass.convert(entry, id))
        .collect())
}

/// Run `entries` in consecutive batches of at most `batch_size`.
///
/// Each batch is all-or-nothing. The first failing batch stops the run;
/// batches already loaded stay loaded.
pub async fn run_batches<P: BatchProcess>(
    pass: &P,
    loader: &dyn ResourceLoader,
    entries: &[P::Entry],
    batch_size: usize,
) -> Result<Vec<P::Output>, BatchError> {
    let size = batch_size.max(1);
    let mut outputs = Vec::with_capacity(entries.len());
    for (batch_no, batch) in entries.chunks(size).enumerate() {
        debug!(batch_no, size = batch.len(), "starting batch");
        let converted = run_batch(pass, loader, batch)
            .await
            .map_err(|err| offset_entry_index(err, batch_no * size))?;
        outputs.extend(converted);
    }
    Ok(outputs)
}

fn offset_entry_index(err: BatchError, offset: usize) -> BatchError {
    match err {
        BatchError::Extract { index, source } => BatchError::Extract {
            index: index + offset,
            source,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdb_kernel::{Collection, Compilations};
    use serde_json::Value;
    use std::sync::Mutex;

    /// Pass over bare strings: record = uppercase, output = "entry=id".
    struct Upper;

    #[async_trait]
    impl BatchProcess for Upper {
        type Entry = String;
        type Record = String;
        type Resource = Compilations;
        type Output = String;

        fn extract(&self, entry: &String) -> Result<String, CompileError> {
            if entry.is_empty() {
                return Err(CompileError::EmptyImmutableOffsets {
                    source_path: "<empty>".into(),
                    ast_node: "0".into(),
                });
            }
            Ok(entry.to_uppercase())
        }

        async fn process(
            &self,
            records: Vec<String>,
            loader: &dyn ResourceLoader,
        ) -> Result<Vec<IdObject<Compilations>>, LoadError> {
            compdb_kernel::load_resources::<Compilations, _>(loader, &records).await
        }

        fn convert(&self, entry: &String, id: IdObject<Compilations>) -> String {
            format!("{entry}={}", id.id())
        }
    }

    #[derive(Default)]
    struct Echo {
        calls: Mutex<Vec<Vec<Value>>>,
        truncate: bool,
    }

    #[async_trait]
    impl ResourceLoader for Echo {
        async fn load(
            &self,
            _collection: Collection,
            records: Vec<Value>,
        ) -> Result<Vec<String>, LoadError> {
            let mut ids: Vec<String> = records
                .iter()
                .map(|r| format!("id-{}", r.as_str().unwrap_or_default()))
                .collect();
            if self.truncate {
                ids.truncate(1);
            }
            self.calls.lock().expect("lock").push(records);
            Ok(ids)
        }
    }

    #[tokio::test]
    async fn converts_entries_positionally() {
        let loader = Echo::default();
        let entries = vec!["a".to_string(), "b".to_string()];

        let out = run_batch(&Upper, &loader, &entries).await.expect("batch");

        assert_eq!(out, vec!["a=id-A".to_string(), "b=id-B".to_string()]);
        assert_eq!(loader.calls.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn empty_batch_never_reaches_the_loader() {
        let loader = Echo::default();
        let out = run_batch(&Upper, &loader, &[]).await.expect("batch");
        assert!(out.is_empty());
        assert!(loader.calls.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn extract_failure_stops_before_loading() {
        let loader = Echo::default();
        let entries = vec!["a".to_string(), String::new()];

        let err = run_batch(&Upper, &loader, &entries)
            .await
            .expect_err("empty entry must fail extract");

        assert!(matches!(err, BatchError::Extract { index: 1, .. }));
        assert!(loader.calls.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn short_loader_answer_fails_the_batch() {
        let loader = Echo {
            truncate: true,
            ..Echo::default()
        };
        let entries = vec!["a".to_string(), "b".to_string()];

        let err = run_batch(&Upper, &loader, &entries)
            .await
            .expect_err("length mismatch must fail");

        assert!(matches!(
            err,
            BatchError::Load(LoadError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn run_batches_chunks_and_keeps_order() {
        let loader = Echo::default();
        let entries: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let out = run_batches(&Upper, &loader, &entries, 2).await.expect("batches");

        assert_eq!(out, vec!["a=id-A", "b=id-B", "c=id-C", "d=id-D", "e=id-E"]);
        let calls = loader.calls.lock().expect("lock");
        assert_eq!(calls.iter().map(Vec::len).collect::<Vec<_>>(), vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn run_batches_reports_absolute_entry_index() {
        let loader = Echo::default();
        let entries: Vec<String> = ["a", "b", "c", ""].iter().map(|s| s.to_string()).collect();

        let err = run_batches(&Upper, &loader, &entries, 2)
            .await
            .expect_err("fourth entry must fail");

        assert!(matches!(err, BatchError::Extract { index: 3, .. }));
        assert_eq!(loader.calls.lock().expect("lock").len(), 1);
    }
}
