//! Wayline facade crate.
//!
//! This crate re-exports the flow, core, and runtime crates with a single
//! entry point. Hosts declare flows, wire an adapter, and drive a
//! `FlowEngine`; see the crate-level tests for a full session walkthrough.

pub use wayline_core as core;
pub use wayline_flow as flow;
pub use wayline_runtime as runtime;

pub use wayline_core::{FlowStore, HydrationReport, KvAdapter, MemoryAdapter, StateValue};
pub use wayline_flow::{FlowSet, FlowSpec, NavOutcome, Navigator, Presentation};
pub use wayline_runtime::{EngineConfig, FlowEngine, HostNavigator, Spooler};

pub mod prelude {
    pub use wayline_core::{
        Discard, FlowStore, HydrationReport, KvAdapter, MemoryAdapter, PersistSink, StateValue,
        WriteThrough, hydrate,
    };
    pub use wayline_flow::{FlowSet, FlowSpec, NavOutcome, Navigator, Presentation, StepSpec};
    pub use wayline_runtime::prelude::*;
}
