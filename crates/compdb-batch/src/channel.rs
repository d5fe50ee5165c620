//! Loader on its own task, reached over a request channel.
//!
//! `spawn_loader` moves a `ResourceLoader` onto a tokio task and hands back a
//! cloneable [`ChannelLoader`]. Each `load` becomes one `LoadRequest` carrying
//! a oneshot reply; the service answers requests strictly one at a time, in
//! arrival order.

use async_trait::async_trait;
use compdb_kernel::{Collection, LoadError, ResourceLoader};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// One pending `load` call.
#[derive(Debug)]
pub struct LoadRequest {
    pub collection: Collection,
    pub records: Vec<Value>,
    reply: oneshot::Sender<Result<Vec<String>, LoadError>>,
}

/// Handle that forwards loads to a spawned loader service.
#[derive(Debug, Clone)]
pub struct ChannelLoader {
    tx: mpsc::Sender<LoadRequest>,
}

#[async_trait]
impl ResourceLoader for ChannelLoader {
    async fn load(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<Vec<String>, LoadError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(LoadRequest {
                collection,
                records,
                reply,
            })
            .await
            .map_err(|_| LoadError::Unavailable("loader service has stopped".into()))?;

        response
            .await
            .map_err(|_| LoadError::Unavailable("loader dropped the request".into()))?
    }
}

/// Run `inner` on a dedicated task.
///
/// The task ends once every `ChannelLoader` clone is dropped, returning
/// `inner` so its state can be inspected or saved.
pub fn spawn_loader<L>(inner: L, capacity: usize) -> (ChannelLoader, JoinHandle<L>)
where
    L: ResourceLoader + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(serve(inner, rx));
    (ChannelLoader { tx }, handle)
}

async fn serve<L: ResourceLoader>(inner: L, mut rx: mpsc::Receiver<LoadRequest>) -> L {
    while let Some(request) = rx.recv().await {
        debug!(
            collection = %request.collection,
            records = request.records.len(),
            "loader request"
        );
        let result = inner.load(request.collection, request.records).await;
        if let Err(err) = &result {
            warn!(error = %err, "load failed");
        }
        // The caller may have gone away; nothing to do then.
        let _ = request.reply.send(result);
    }
    inner
}
