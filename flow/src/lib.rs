//! Wayline Flow - Flow Declaration Layer
//!
//! This crate defines the **structural** aspects of Wayline:
//! - `FlowSpec`: named, ordered step declarations
//! - `Navigator`: the flow stack and step cursor
//! - `NavOutcome`: navigation results as data
//!
//! **IMPORTANT**: This layer is Pure Rust - no IO, no Async, no host bindings.

pub mod nav;
pub mod spec;

pub use nav::{NavOutcome, Navigator, ScreenRef};
pub use spec::{FlowSet, FlowSpec, Presentation, StepSpec};
