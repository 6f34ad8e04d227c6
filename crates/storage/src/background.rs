use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use crate::store::KeyValueStore;
use crate::{Result, StorageError};

enum WriteOp {
    Save { key: String, value: String },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget wrapper around another key-value store.
///
/// `save` and `remove` enqueue the write and return immediately; a tokio
/// task applies queued writes to the inner store in order, on the blocking
/// pool. Failed writes are logged and counted, never reported back to the
/// caller. Reads go straight to the inner store and do not observe writes
/// that are still queued; call [`flush`](Self::flush) first when that matters.
pub struct BackgroundStorage<S> {
    inner: Arc<S>,
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl<S> Clone for BackgroundStorage<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tx: self.tx.clone(),
        }
    }
}

impl<S: KeyValueStore + 'static> BackgroundStorage<S> {
    /// Starts the writer task on the current tokio runtime.
    pub fn spawn(inner: S) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| StorageError::NoRuntime)?;
        let inner = Arc::new(inner);
        let (tx, rx) = mpsc::unbounded_channel();
        handle.spawn(run_writer(inner.clone(), rx));
        Ok(Self { inner, tx })
    }

    /// Waits until every write queued before this call has been applied.
    pub async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(WriteOp::Flush(done_tx))
            .map_err(|_| StorageError::WriterClosed)?;
        done_rx.await.map_err(|_| StorageError::WriterClosed)
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: KeyValueStore + 'static> KeyValueStore for BackgroundStorage<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.tx
            .send(WriteOp::Save {
                key: key.to_string(),
                value: value.to_string(),
            })
            .map_err(|_| StorageError::WriterClosed)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.tx
            .send(WriteOp::Remove {
                key: key.to_string(),
            })
            .map_err(|_| StorageError::WriterClosed)
    }
}

async fn run_writer<S: KeyValueStore + 'static>(
    inner: Arc<S>,
    mut rx: mpsc::UnboundedReceiver<WriteOp>,
) {
    while let Some(op) = rx.recv().await {
        let store = inner.clone();
        let outcome = match op {
            WriteOp::Flush(done) => {
                let _ = done.send(());
                continue;
            }
            WriteOp::Save { key, value } => {
                tokio::task::spawn_blocking(move || store.save(&key, &value)).await
            }
            WriteOp::Remove { key } => {
                tokio::task::spawn_blocking(move || store.remove(&key)).await
            }
        };

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "background write failed");
                metrics::counter!("storage_background_write_failures_total").increment(1);
            }
            Err(e) => {
                tracing::warn!(error = %e, "background write task aborted");
                metrics::counter!("storage_background_write_failures_total").increment(1);
            }
        }
    }
    tracing::debug!("background writer stopped");
}
