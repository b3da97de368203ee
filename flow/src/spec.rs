//! FlowSpec - Named Flow Declarations
//!
//! A flow is a named, ordered sequence of steps. Each step binds a step name
//! to a renderable screen identifier plus a presentation hint for the host's
//! modal layer. Declarations are plain data: nothing here renders, navigates,
//! or validates against a host.
//!
//! # Example
//! ```rust
//! use wayline_flow::{FlowSpec, Presentation};
//!
//! let auth = FlowSpec::new("Auth")
//!     .step("Signup", "SignupScreen", Presentation::Full)
//!     .step("Login", "LoginScreen", Presentation::Full)
//!     .step("Test2", "Test2Screen", Presentation::Half);
//! assert_eq!(auth.len(), 3);
//! ```

/// Presentation hint consumed by the host's modal layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    /// Full-screen step
    #[default]
    Full,
    /// Half-sheet modal
    Half,
    /// Bottom sheet
    Bottom,
}

/// A single declared step: a name bound to a screen and a presentation hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub name: String,
    pub screen: String,
    pub presentation: Presentation,
}

impl StepSpec {
    pub fn new(
        name: impl Into<String>,
        screen: impl Into<String>,
        presentation: Presentation,
    ) -> Self {
        Self {
            name: name.into(),
            screen: screen.into(),
            presentation,
        }
    }
}

/// A named flow: an ordered set of steps plus a state-sharing flag.
///
/// `share_state` marks a flow whose private state tier survives leaving the
/// flow; teardown of such flows is skipped by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSpec {
    pub name: String,
    pub share_state: bool,
    pub steps: Vec<StepSpec>,
}

impl FlowSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            share_state: false,
            steps: Vec::new(),
        }
    }

    /// Mark this flow's private state as surviving teardown.
    pub fn share_state(mut self) -> Self {
        self.share_state = true;
        self
    }

    /// Append a step. Step order is declaration order.
    pub fn step(
        mut self,
        name: impl Into<String>,
        screen: impl Into<String>,
        presentation: Presentation,
    ) -> Self {
        self.steps.push(StepSpec::new(name, screen, presentation));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of a step by name, if declared.
    pub fn position(&self, step_name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == step_name)
    }
}

/// The set of flows known to a navigator.
///
/// Lookup is by declared name. Duplicate or dangling names are not rejected
/// here; the first declaration wins on lookup.
#[derive(Debug, Clone, Default)]
pub struct FlowSet {
    flows: Vec<FlowSpec>,
}

impl FlowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flow. Chained like a builder.
    pub fn declare(mut self, flow: FlowSpec) -> Self {
        self.flows.push(flow);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FlowSpec> {
        self.flows.iter().find(|f| f.name == name)
    }

    /// Index of a flow by name, first declaration wins.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.flows.iter().position(|f| f.name == name)
    }

    pub fn by_index(&self, index: usize) -> Option<&FlowSpec> {
        self.flows.get(index)
    }
}
