//! Spooler - Fire-and-Forget Persistence
//!
//! Store mutations must not await durability. The spooler queues every
//! `PersistOp` on an unbounded channel and a spawned drain task applies them
//! to the adapter in send order, so two writes to the same key land in call
//! order while the caller never blocks. Failures are logged on the drain
//! side and dropped; memory stays authoritative.

use std::sync::Arc;
use tokio::sync::mpsc;
use wayline_core::{KvAdapter, PersistOp, PersistSink};

/// Asynchronous `PersistSink` over a key-value adapter.
///
/// Dropping the store (and with it the spooler) closes the channel; the
/// drain task finishes the queued ops and exits.
pub struct Spooler {
    tx: mpsc::UnboundedSender<PersistOp>,
}

impl Spooler {
    /// Spawn the drain task on the current tokio runtime.
    pub fn spawn<A: KvAdapter + 'static>(adapter: Arc<A>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PersistOp>();

        tokio::spawn(async move {
            while let Some(op) = rx.recv().await {
                let result = match &op {
                    PersistOp::Set { key, payload } => adapter.set(key, payload),
                    PersistOp::Delete { key } => adapter.delete(key),
                };
                if let Err(err) = result {
                    tracing::warn!(key = op.key(), error = %err, "spooled persistence op failed");
                }
            }
        });

        Self { tx }
    }
}

impl PersistSink for Spooler {
    fn apply(&self, op: PersistOp) {
        if self.tx.send(op).is_err() {
            tracing::warn!("persistence spooler closed, dropping op");
        }
    }
}
