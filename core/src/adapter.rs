//! KvAdapter - The Key-Value Persistence Seam
//!
//! The store persists its shared tier through this trait. Hosts wrap
//! whatever embedded key-value storage the platform offers; the store only
//! assumes string keys and string payloads, and namespaces its own keys so
//! the adapter instance can be shared with unrelated host data.

use ahash::AHashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors surfaced by a key-value backend.
///
/// These never escape the persistence boundary: the store and sinks catch
/// them, log, and keep the in-memory state authoritative.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("backend rejected {op} for key `{key}`: {reason}")]
    Rejected {
        op: &'static str,
        key: String,
        reason: String,
    },
}

/// Contract for the embedded key-value store backing the shared tier.
pub trait KvAdapter: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<(), AdapterError>;
    fn get(&self, key: &str) -> Result<Option<String>, AdapterError>;
    fn delete(&self, key: &str) -> Result<(), AdapterError>;
    /// Every key currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>, AdapterError>;
}

/// In-process adapter for tests and hosts that opt out of durability.
///
/// `fail_writes` flips the adapter into a mode where `set`/`delete` fail,
/// so swallowed-error paths can be exercised.
#[derive(Default)]
pub struct MemoryAdapter {
    entries: Mutex<AHashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self, op: &'static str, key: &str) -> Result<(), AdapterError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AdapterError::Rejected {
                op,
                key: key.to_string(),
                reason: "write failure injected".to_string(),
            });
        }
        Ok(())
    }
}

impl KvAdapter for MemoryAdapter {
    fn set(&self, key: &str, value: &str) -> Result<(), AdapterError> {
        self.check_writable("set", key)?;
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, AdapterError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), AdapterError> {
        self.check_writable("delete", key)?;
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AdapterError> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
