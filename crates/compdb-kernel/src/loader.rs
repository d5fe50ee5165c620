//! The resource-loader seam.
//!
//! Persistence is owned by whoever implements `ResourceLoader`. Callers hand
//! over a whole batch of records for one collection and wait for exactly one
//! id per record, in input order. A loader either answers the full batch or
//! fails it; there is no partial result.

use crate::collection::{Collection, Resource};
use crate::error::LoadError;
use crate::id::IdObject;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Persist `records` into `collection`, returning their ids in order.
    async fn load(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<Vec<String>, LoadError>;
}

#[async_trait]
impl<L: ResourceLoader + ?Sized> ResourceLoader for std::sync::Arc<L> {
    async fn load(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<Vec<String>, LoadError> {
        (**self).load(collection, records).await
    }
}

/// Load typed records into `K`'s collection with one loader call.
///
/// Checks that the loader answered with one id per record.
pub async fn load_resources<K, T>(
    loader: &(dyn ResourceLoader + '_),
    records: &[T],
) -> Result<Vec<IdObject<K>>, LoadError>
where
    K: Resource,
    T: Serialize,
{
    let collection = K::COLLECTION;
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LoadError::Serialize {
            collection,
            reason: e.to_string(),
        })?;

    let expected = values.len();
    let ids = loader.load(collection, values).await?;
    if ids.len() != expected {
        return Err(LoadError::LengthMismatch {
            collection,
            expected,
            actual: ids.len(),
        });
    }

    Ok(ids.into_iter().map(IdObject::new).collect())
}
