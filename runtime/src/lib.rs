pub mod config;
pub mod engine;
pub mod host;
pub mod spool;
pub mod telemetry;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::FlowEngine;
    pub use crate::host::HostNavigator;
    pub use crate::spool::Spooler;
}

pub use config::EngineConfig;
pub use engine::FlowEngine;
pub use host::HostNavigator;
pub use spool::Spooler;
pub use telemetry::init_stdout_tracing;
