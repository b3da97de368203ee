//! Hydration - Startup Replay of Persisted Shared Entries
//!
//! One-shot reconciliation between the adapter and a fresh store: every
//! persisted key under the shared prefix is decoded and replayed through
//! `set_shared`. Replaying re-persists each entry, which is redundant but
//! idempotent. Must run before the first flow renders so that shared reads
//! are trustworthy.

use crate::adapter::KvAdapter;
use crate::persist::PersistedEntry;
use crate::store::FlowStore;

/// What hydration managed to restore.
///
/// Entries that cannot be read or decoded are skipped, never fatal; the
/// caller decides whether `skipped > 0` is worth surfacing to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationReport {
    pub restored: usize,
    pub skipped: usize,
}

/// Replay all persisted shared entries into `store`.
pub fn hydrate<A: KvAdapter + ?Sized>(store: &mut FlowStore, adapter: &A) -> HydrationReport {
    let prefix = store.prefix().to_string();
    let mut report = HydrationReport::default();

    let keys = match adapter.keys() {
        Ok(keys) => keys,
        Err(err) => {
            tracing::warn!(error = %err, "hydration could not enumerate persisted keys");
            return report;
        }
    };

    for full_key in keys.iter().filter(|k| k.starts_with(&prefix)) {
        let payload = match adapter.get(full_key) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                report.skipped += 1;
                continue;
            }
            Err(err) => {
                tracing::debug!(key = %full_key, error = %err, "skipping unreadable persisted entry");
                report.skipped += 1;
                continue;
            }
        };

        match PersistedEntry::decode(&payload) {
            Ok(entry) => {
                store.set_shared(&full_key[prefix.len()..], entry.value);
                report.restored += 1;
            }
            Err(err) => {
                tracing::debug!(key = %full_key, error = %err, "skipping malformed persisted entry");
                report.skipped += 1;
            }
        }
    }

    tracing::debug!(restored = report.restored, skipped = report.skipped, "hydration complete");
    report
}
