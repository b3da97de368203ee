//! FlowEngine - Binding Store, Navigator, and Host
//!
//! The engine is the piece flow authors actually hold: it owns the scoped
//! store and the navigator, and translates `NavOutcome` values into host
//! presentation calls plus private-state teardown. Each engine instance is
//! an independent session; nothing here is a process-wide singleton.

use crate::config::EngineConfig;
use crate::host::HostNavigator;
use uuid::Uuid;
use wayline_core::{FlowStore, HydrationReport, KvAdapter, PersistSink, hydrate};
use wayline_flow::{FlowSet, NavOutcome, Navigator, ScreenRef};

pub struct FlowEngine {
    id: Uuid,
    store: FlowStore,
    nav: Navigator,
    host: Box<dyn HostNavigator>,
}

impl FlowEngine {
    pub fn new(
        config: &EngineConfig,
        flows: FlowSet,
        sink: Box<dyn PersistSink>,
        host: Box<dyn HostNavigator>,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "flow engine created");
        Self {
            id,
            store: FlowStore::with_prefix(config.shared_prefix.clone(), sink),
            nav: Navigator::new(flows),
            host,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Scoped state accessors for step bodies.
    pub fn store(&self) -> &FlowStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FlowStore {
        &mut self.store
    }

    /// The step currently on top, if any flow is open.
    pub fn current(&self) -> Option<ScreenRef> {
        self.nav.current()
    }

    /// Replay persisted shared entries. Call once, before the first `open`.
    pub fn hydrate<A: KvAdapter + ?Sized>(&mut self, adapter: &A) -> HydrationReport {
        let report = hydrate(&mut self.store, adapter);
        tracing::info!(
            session = %self.id,
            restored = report.restored,
            skipped = report.skipped,
            "shared state hydrated"
        );
        report
    }

    /// Push the named flow at its first step.
    pub async fn open(&mut self, flow_name: &str) -> NavOutcome {
        let outcome = self.nav.open(flow_name);
        self.apply(outcome).await
    }

    /// Advance within the current flow; clamps at the terminal step.
    pub async fn next(&mut self) -> NavOutcome {
        let outcome = self.nav.next();
        self.apply(outcome).await
    }

    /// Step back; no-op at the first step.
    pub async fn prev(&mut self) -> NavOutcome {
        let outcome = self.nav.prev();
        self.apply(outcome).await
    }

    /// Pop the current flow, tearing down its private state on the way out
    /// unless the flow was declared share-state.
    pub async fn close(&mut self) -> NavOutcome {
        let outcome = self.nav.close();
        self.apply(outcome).await
    }

    async fn apply(&mut self, outcome: NavOutcome) -> NavOutcome {
        match &outcome {
            NavOutcome::Stay => {}
            NavOutcome::Show(screen) => {
                tracing::debug!(
                    session = %self.id,
                    flow = %screen.flow,
                    step = %screen.step,
                    "presenting step"
                );
                self.host.present(&screen.screen, screen.presentation).await;
            }
            NavOutcome::Leave { torn_down, resume } => {
                if let Some(flow) = torn_down {
                    self.store.clear_private(flow);
                }
                self.host.dismiss().await;
                if let Some(screen) = resume {
                    tracing::debug!(session = %self.id, flow = %screen.flow, step = %screen.step, "resumed flow");
                }
            }
        }
        outcome
    }
}

impl std::fmt::Debug for FlowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowEngine")
            .field("id", &self.id)
            .field("depth", &self.nav.depth())
            .field("store", &self.store)
            .finish()
    }
}
