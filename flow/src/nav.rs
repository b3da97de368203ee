//! Navigator - The Flow Stack and Step Cursor
//!
//! Navigation primitives return `NavOutcome` values instead of performing
//! side effects. The runtime layer translates an outcome into host
//! presentation calls and private-state teardown; this layer only decides
//! where the cursor goes.
//!
//! # Philosophy
//! > Navigation = Control Flow as Data

use crate::spec::{FlowSet, Presentation};

/// A resolved pointer to one declared step of one declared flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRef {
    pub flow: String,
    pub step: String,
    pub screen: String,
    pub presentation: Presentation,
}

/// The result of a navigation primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing to do: clamped edge, unknown flow, or empty stack
    Stay,
    /// Present the referenced step
    Show(ScreenRef),
    /// A flow was closed. `torn_down` names the flow whose private state
    /// must be cleared (`None` for share-state flows); `resume` is the step
    /// back on top, if the stack is non-empty.
    Leave {
        torn_down: Option<String>,
        resume: Option<ScreenRef>,
    },
}

impl NavOutcome {
    pub fn is_stay(&self) -> bool {
        matches!(self, NavOutcome::Stay)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    flow: usize,
    cursor: usize,
}

/// The flow stack. Owns the declared `FlowSet` and tracks the open flows
/// plus the current step of each.
///
/// Faithful to the facade it models, it performs no validation beyond name
/// lookup: opening an undeclared flow is a no-op, not an error, and nothing
/// forbids opening the same flow twice.
#[derive(Debug, Clone)]
pub struct Navigator {
    flows: FlowSet,
    stack: Vec<Frame>,
}

impl Navigator {
    pub fn new(flows: FlowSet) -> Self {
        Self {
            flows,
            stack: Vec::new(),
        }
    }

    pub fn flows(&self) -> &FlowSet {
        &self.flows
    }

    /// Number of open flows.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The step currently on top of the stack, if any.
    pub fn current(&self) -> Option<ScreenRef> {
        self.stack.last().and_then(|f| self.screen_ref(*f))
    }

    /// Push the named flow at its first step.
    ///
    /// Unknown names and flows with no declared steps leave the stack
    /// untouched.
    pub fn open(&mut self, flow_name: &str) -> NavOutcome {
        let Some(flow) = self.flows.index_of(flow_name) else {
            return NavOutcome::Stay;
        };
        if self.flows.by_index(flow).is_none_or(|f| f.is_empty()) {
            return NavOutcome::Stay;
        }
        self.stack.push(Frame { flow, cursor: 0 });
        self.show_current()
    }

    /// Advance to the next declared step of the current flow.
    ///
    /// Clamps at the terminal step: `next()` there is a no-op rather than a
    /// delegation to the parent flow.
    pub fn next(&mut self) -> NavOutcome {
        let Some(frame) = self.stack.last_mut() else {
            return NavOutcome::Stay;
        };
        let steps = self.flows.by_index(frame.flow).map_or(0, |f| f.len());
        if frame.cursor + 1 >= steps {
            return NavOutcome::Stay;
        }
        frame.cursor += 1;
        self.show_current()
    }

    /// Return to the previous step; no-op at the first step.
    pub fn prev(&mut self) -> NavOutcome {
        let Some(frame) = self.stack.last_mut() else {
            return NavOutcome::Stay;
        };
        if frame.cursor == 0 {
            return NavOutcome::Stay;
        }
        frame.cursor -= 1;
        self.show_current()
    }

    /// Pop the current flow, reporting which private namespace to tear down
    /// and which step resumes underneath.
    pub fn close(&mut self) -> NavOutcome {
        let Some(frame) = self.stack.pop() else {
            return NavOutcome::Stay;
        };
        let torn_down = self.flows.by_index(frame.flow).and_then(|f| {
            if f.share_state {
                None
            } else {
                Some(f.name.clone())
            }
        });
        NavOutcome::Leave {
            torn_down,
            resume: self.current(),
        }
    }

    fn show_current(&self) -> NavOutcome {
        match self.current() {
            Some(screen) => NavOutcome::Show(screen),
            None => NavOutcome::Stay,
        }
    }

    fn screen_ref(&self, frame: Frame) -> Option<ScreenRef> {
        let flow = self.flows.by_index(frame.flow)?;
        let step = flow.steps.get(frame.cursor)?;
        Some(ScreenRef {
            flow: flow.name.clone(),
            step: step.name.clone(),
            screen: step.screen.clone(),
            presentation: step.presentation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FlowSpec;

    fn auth_flows() -> FlowSet {
        FlowSet::new().declare(
            FlowSpec::new("Auth")
                .step("Signup", "SignupScreen", Presentation::Full)
                .step("Login", "LoginScreen", Presentation::Full)
                .step("Test2", "Test2Screen", Presentation::Half),
        )
    }

    fn step_of(outcome: NavOutcome) -> String {
        match outcome {
            NavOutcome::Show(screen) => screen.step,
            other => panic!("expected Show, got {other:?}"),
        }
    }

    #[test]
    fn test_open_starts_at_first_step() {
        let mut nav = Navigator::new(auth_flows());
        assert_eq!(step_of(nav.open("Auth")), "Signup");
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_open_unknown_flow_is_noop() {
        let mut nav = Navigator::new(auth_flows());
        assert!(nav.open("Nope").is_stay());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn test_open_empty_flow_is_noop() {
        let flows = FlowSet::new().declare(FlowSpec::new("Empty"));
        let mut nav = Navigator::new(flows);
        assert!(nav.open("Empty").is_stay());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn test_next_walks_declared_order_and_clamps() {
        let mut nav = Navigator::new(auth_flows());
        nav.open("Auth");

        assert_eq!(step_of(nav.next()), "Login");
        assert_eq!(step_of(nav.next()), "Test2");
        // Terminal step: clamp, not parent delegation
        assert!(nav.next().is_stay());
        assert_eq!(nav.current().unwrap().step, "Test2");
    }

    #[test]
    fn test_prev_is_noop_at_first_step() {
        let mut nav = Navigator::new(auth_flows());
        nav.open("Auth");

        assert!(nav.prev().is_stay());
        nav.next();
        assert_eq!(step_of(nav.prev()), "Signup");
    }

    #[test]
    fn test_close_reports_teardown_and_resume() {
        let flows = FlowSet::new()
            .declare(FlowSpec::new("Service").step("Home", "HomeScreen", Presentation::Full))
            .declare(FlowSpec::new("InfoModal").step("Info", "InfoScreen", Presentation::Bottom));
        let mut nav = Navigator::new(flows);
        nav.open("Service");
        nav.open("InfoModal");

        match nav.close() {
            NavOutcome::Leave { torn_down, resume } => {
                assert_eq!(torn_down.as_deref(), Some("InfoModal"));
                assert_eq!(resume.unwrap().flow, "Service");
            }
            other => panic!("expected Leave, got {other:?}"),
        }
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_close_share_state_flow_skips_teardown() {
        let flows = FlowSet::new().declare(
            FlowSpec::new("Wizard")
                .share_state()
                .step("One", "OneScreen", Presentation::Full),
        );
        let mut nav = Navigator::new(flows);
        nav.open("Wizard");

        match nav.close() {
            NavOutcome::Leave { torn_down, resume } => {
                assert_eq!(torn_down, None);
                assert_eq!(resume, None);
            }
            other => panic!("expected Leave, got {other:?}"),
        }
    }

    #[test]
    fn test_close_on_empty_stack_is_noop() {
        let mut nav = Navigator::new(auth_flows());
        assert!(nav.close().is_stay());
    }
}
