//! FlowStore - The Scoped State Store
//!
//! Single source of truth for all flow-scoped data, split across four tiers:
//!
//! - **shared**: global keys, written through to the key-value adapter
//! - **private**: per-flow keys, cleared on flow teardown
//! - **category**: grouped keys, in-memory only
//! - **secure**: category-scoped references to secure-channel slots
//!
//! Every operation is total over its scope: reads of absent keys return
//! `None`, writes overwrite, and nothing here raises. Durability is
//! best-effort through the attached `PersistSink`; memory is authoritative
//! for the running session.

use crate::persist::{PersistOp, PersistSink, PersistedEntry, shared_key};
use ahash::AHashMap;

/// Values held by the store. Anything JSON-serializable.
pub type StateValue = serde_json::Value;

/// A secure-tier record: the alias of the secure-channel slot plus the plain
/// reference payload the caller supplied. The store never performs secure
/// storage IO itself; that responsibility stays with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureEntry {
    pub alias: String,
    pub reference: StateValue,
}

pub struct FlowStore {
    prefix: String,
    sink: Box<dyn PersistSink>,
    shared: AHashMap<String, StateValue>,
    private: AHashMap<String, AHashMap<String, StateValue>>,
    category: AHashMap<String, AHashMap<String, StateValue>>,
    // Keyed by the `category:key` composite
    secure: AHashMap<String, SecureEntry>,
}

impl FlowStore {
    /// Store with the default shared-tier namespace prefix.
    pub fn new(sink: Box<dyn PersistSink>) -> Self {
        Self::with_prefix(crate::persist::SHARED_PREFIX, sink)
    }

    pub fn with_prefix(prefix: impl Into<String>, sink: Box<dyn PersistSink>) -> Self {
        Self {
            prefix: prefix.into(),
            sink,
            shared: AHashMap::new(),
            private: AHashMap::new(),
            category: AHashMap::new(),
            secure: AHashMap::new(),
        }
    }

    /// Namespace prefix for shared entries in the backing adapter.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn composite(category: &str, key: &str) -> String {
        format!("{category}:{key}")
    }

    // --- shared tier ---

    /// Insert or overwrite a shared entry and schedule its write-through.
    pub fn set_shared(&mut self, key: impl Into<String>, value: StateValue) {
        let key = key.into();
        self.shared.insert(key.clone(), value.clone());

        match PersistedEntry::now(value).encode() {
            Ok(payload) => self.sink.apply(PersistOp::Set {
                key: shared_key(&self.prefix, &key),
                payload,
            }),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "shared entry not persistable, kept in memory only");
            }
        }
    }

    /// Non-destructive read of a shared entry.
    pub fn get_shared(&self, key: &str) -> Option<&StateValue> {
        self.shared.get(key)
    }

    /// Read and remove a shared entry, in memory and in the adapter.
    ///
    /// Exactly-once: the pre-removal value is returned, a second take of the
    /// same key returns `None`.
    pub fn take_shared(&mut self, key: &str) -> Option<StateValue> {
        let value = self.shared.remove(key)?;
        self.sink.apply(PersistOp::Delete {
            key: shared_key(&self.prefix, key),
        });
        Some(value)
    }

    // --- private tier ---

    /// Write into a flow's private namespace, creating it lazily.
    pub fn set_private(&mut self, flow: &str, key: impl Into<String>, value: StateValue) {
        self.private
            .entry(flow.to_string())
            .or_default()
            .insert(key.into(), value);
    }

    /// Read from a flow's private namespace. Unknown flows read as absent.
    pub fn get_private(&self, flow: &str, key: &str) -> Option<&StateValue> {
        self.private.get(flow)?.get(key)
    }

    /// Drop a flow's entire private namespace; no-op if absent.
    pub fn clear_private(&mut self, flow: &str) {
        if let Some(entries) = self.private.remove(flow) {
            tracing::debug!(flow = %flow, entries = entries.len(), "private state torn down");
        }
    }

    // --- category and secure tiers ---

    /// Write a category entry, or - when `secure_alias` is given - a secure
    /// reference for the same `(category, key)` pair.
    ///
    /// The two tiers are mutually exclusive per pair: a secure write evicts
    /// the plain entry and a plain write evicts the secure one.
    pub fn set_category(
        &mut self,
        category: &str,
        key: &str,
        value: StateValue,
        secure_alias: Option<&str>,
    ) {
        let composite = Self::composite(category, key);
        match secure_alias {
            Some(alias) => {
                if let Some(entries) = self.category.get_mut(category) {
                    entries.remove(key);
                }
                self.secure.insert(
                    composite,
                    SecureEntry {
                        alias: alias.to_string(),
                        reference: value,
                    },
                );
            }
            None => {
                self.secure.remove(&composite);
                self.category
                    .entry(category.to_string())
                    .or_default()
                    .insert(key.to_string(), value);
            }
        }
    }

    /// Read mirroring `set_category`: with an alias the secure tier is
    /// consulted and the recorded alias must match; without one only the
    /// plain tier is.
    pub fn get_category(
        &self,
        category: &str,
        key: &str,
        secure_alias: Option<&str>,
    ) -> Option<&StateValue> {
        match secure_alias {
            Some(alias) => {
                let entry = self.secure.get(&Self::composite(category, key))?;
                if entry.alias != alias {
                    tracing::warn!(category = %category, key = %key, "secure read with mismatched alias");
                    return None;
                }
                Some(&entry.reference)
            }
            None => self.category.get(category)?.get(key),
        }
    }

    /// The secure record for a pair, alias included. Host bridges use this
    /// to resolve which keystore slot to hit.
    pub fn secure_entry(&self, category: &str, key: &str) -> Option<&SecureEntry> {
        self.secure.get(&Self::composite(category, key))
    }
}

impl std::fmt::Debug for FlowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowStore")
            .field("prefix", &self.prefix)
            .field("shared", &self.shared.len())
            .field("private_flows", &self.private.len())
            .field("categories", &self.category.len())
            .field("secure", &self.secure.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{KvAdapter, MemoryAdapter};
    use crate::persist::{Discard, WriteThrough};
    use serde_json::json;
    use std::sync::Arc;

    fn memory_store() -> FlowStore {
        FlowStore::new(Box::new(Discard))
    }

    #[test]
    fn test_take_shared_is_exactly_once() {
        let mut store = memory_store();
        store.set_shared("promoCode", json!("SAVE10"));

        assert_eq!(store.take_shared("promoCode"), Some(json!("SAVE10")));
        assert_eq!(store.take_shared("promoCode"), None);
    }

    #[test]
    fn test_set_shared_overwrites() {
        let mut store = memory_store();
        store.set_shared("k", json!(1));
        store.set_shared("k", json!(2));

        assert_eq!(store.get_shared("k"), Some(&json!(2)));
    }

    #[test]
    fn test_shared_write_through_and_delete() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut store = FlowStore::new(Box::new(WriteThrough::new(adapter.clone())));

        store.set_shared("promoCode", json!("SAVE10"));
        let payload = adapter.get("shared:promoCode").unwrap().unwrap();
        let entry = crate::persist::PersistedEntry::decode(&payload).unwrap();
        assert_eq!(entry.value, json!("SAVE10"));

        store.take_shared("promoCode");
        assert_eq!(adapter.get("shared:promoCode").unwrap(), None);
    }

    #[test]
    fn test_failed_write_through_keeps_memory_authoritative() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut store = FlowStore::new(Box::new(WriteThrough::new(adapter.clone())));

        adapter.fail_writes(true);
        store.set_shared("k", json!("v"));

        assert_eq!(adapter.get("shared:k").unwrap(), None);
        assert_eq!(store.take_shared("k"), Some(json!("v")));
    }

    #[test]
    fn test_clear_private_scopes_to_one_flow() {
        let mut store = memory_store();
        store.set_private("Auth", "otp", json!("123456"));
        store.set_private("Auth", "phone", json!("+15550100"));
        store.set_private("Service", "draft", json!({"note": "keep me"}));

        store.clear_private("Auth");

        assert_eq!(store.get_private("Auth", "otp"), None);
        assert_eq!(store.get_private("Auth", "phone"), None);
        assert_eq!(
            store.get_private("Service", "draft"),
            Some(&json!({"note": "keep me"}))
        );
    }

    #[test]
    fn test_clear_private_absent_flow_is_noop() {
        let mut store = memory_store();
        store.clear_private("NeverRegistered");
        assert_eq!(store.get_private("NeverRegistered", "k"), None);
    }

    #[test]
    fn test_secure_write_suppresses_plain_read() {
        let mut store = memory_store();
        store.set_category("payment", "card", json!({"last4": "4242"}), None);
        store.set_category("payment", "card", json!({"token": "tok_1"}), Some("keystore.card"));

        // Mutual exclusion: the plain entry for the pair is gone
        assert_eq!(store.get_category("payment", "card", None), None);
        assert_eq!(
            store.get_category("payment", "card", Some("keystore.card")),
            Some(&json!({"token": "tok_1"}))
        );
    }

    #[test]
    fn test_plain_write_evicts_secure_pair() {
        let mut store = memory_store();
        store.set_category("payment", "card", json!("ref"), Some("keystore.card"));
        store.set_category("payment", "card", json!("plain"), None);

        assert_eq!(store.get_category("payment", "card", Some("keystore.card")), None);
        assert_eq!(store.get_category("payment", "card", None), Some(&json!("plain")));
        assert_eq!(store.secure_entry("payment", "card"), None);
    }

    #[test]
    fn test_secure_read_requires_matching_alias() {
        let mut store = memory_store();
        store.set_category("payment", "card", json!("ref"), Some("keystore.card"));

        assert_eq!(store.get_category("payment", "card", Some("other.alias")), None);
        assert_eq!(
            store.secure_entry("payment", "card").map(|e| e.alias.as_str()),
            Some("keystore.card")
        );
    }

    #[test]
    fn test_category_pairs_are_independent() {
        let mut store = memory_store();
        store.set_category("prefs", "theme", json!("dark"), None);
        store.set_category("prefs", "locale", json!("en-US"), None);
        store.set_category("cache", "theme", json!("light"), None);

        assert_eq!(store.get_category("prefs", "theme", None), Some(&json!("dark")));
        assert_eq!(store.get_category("cache", "theme", None), Some(&json!("light")));
        assert_eq!(store.get_category("prefs", "missing", None), None);
        assert_eq!(store.get_category("unknown", "theme", None), None);
    }
}
