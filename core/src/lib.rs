pub mod adapter;
pub mod hydrate;
pub mod persist;
pub mod store;

pub use adapter::{AdapterError, KvAdapter, MemoryAdapter};
pub use hydrate::{HydrationReport, hydrate};
pub use persist::{Discard, PersistOp, PersistSink, PersistedEntry, SHARED_PREFIX, WriteThrough};
pub use store::{FlowStore, SecureEntry, StateValue};
