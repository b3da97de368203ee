//! Persistence - Write-Through Sinks for the Shared Tier
//!
//! Store mutations of the shared tier emit `PersistOp`s to a `PersistSink`.
//! Sinks are infallible from the store's point of view: a sink that cannot
//! apply an op logs and drops it, and the in-memory state stays
//! authoritative for the running session.

use crate::adapter::KvAdapter;
use crate::store::StateValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Namespace prefix for shared-tier keys in the backing adapter.
///
/// Distinguishes Wayline's entries from anything else the host app keeps in
/// the same adapter instance.
pub const SHARED_PREFIX: &str = "shared:";

/// Compose the adapter key for a shared-tier entry.
pub fn shared_key(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

/// The on-disk envelope for one shared entry.
///
/// Wrapping the raw value records the write time and gives hydration a
/// concrete shape to reject when a stored payload is corrupt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEntry {
    pub value: StateValue,
    pub written_at: DateTime<Utc>,
}

impl PersistedEntry {
    pub fn now(value: StateValue) -> Self {
        Self {
            value,
            written_at: Utc::now(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// A single durable effect requested by the store.
#[derive(Debug, Clone)]
pub enum PersistOp {
    Set { key: String, payload: String },
    Delete { key: String },
}

impl PersistOp {
    pub fn key(&self) -> &str {
        match self {
            PersistOp::Set { key, .. } => key,
            PersistOp::Delete { key } => key,
        }
    }
}

/// Where the store sends durable effects.
///
/// Implementations must not block the caller and must not fail it: durable
/// state is best-effort.
pub trait PersistSink: Send + Sync {
    fn apply(&self, op: PersistOp);
}

/// Synchronous write-through sink: applies every op inline against the
/// adapter, logging and swallowing backend failures.
pub struct WriteThrough<A: KvAdapter> {
    adapter: Arc<A>,
}

impl<A: KvAdapter> WriteThrough<A> {
    pub fn new(adapter: Arc<A>) -> Self {
        Self { adapter }
    }
}

impl<A: KvAdapter> PersistSink for WriteThrough<A> {
    fn apply(&self, op: PersistOp) {
        let result = match &op {
            PersistOp::Set { key, payload } => self.adapter.set(key, payload),
            PersistOp::Delete { key } => self.adapter.delete(key),
        };
        if let Err(err) = result {
            tracing::warn!(key = op.key(), error = %err, "shared-state write-through failed");
        }
    }
}

/// Sink that drops every op. For stores that should not persist at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl PersistSink for Discard {
    fn apply(&self, _op: PersistOp) {}
}
