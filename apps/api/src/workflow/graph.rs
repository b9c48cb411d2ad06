//! Static topology of the interrogation graph.
//!
//! The graph is a fixed transition table over an explicit step enum rather
//! than a registry of boxed callables: every edge is visible here, and the
//! executor cannot run steps in an order this module does not describe.
//!
//! ```text
//! scanner -> interviewer -> wait_for_user -> router -+-> writer -> END
//!                ^                                   |
//!                +------------------ followup -------+
//! ```
//!
//! `wait_for_user` is the sole interrupt point: the executor pauses before
//! running it and resumes by running it first on the next invocation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workflow::state::{BranchDecision, WorkflowState};

/// Every step in the graph, in topology order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    Scanner,
    Interviewer,
    WaitForUser,
    Router,
    Writer,
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepName::Scanner => "scanner",
            StepName::Interviewer => "interviewer",
            StepName::WaitForUser => "wait_for_user",
            StepName::Router => "router",
            StepName::Writer => "writer",
        };
        f.write_str(name)
    }
}

/// Outgoing edge of a step.
pub enum Edge {
    /// Unconditional edge to a fixed step.
    To(StepName),
    /// Conditional edge: the target is computed from the state produced so far.
    Branch(fn(&WorkflowState) -> StepName),
    /// Terminal step; the walk ends after it runs.
    End,
}

/// First step of a fresh session.
pub const ENTRY_STEP: StepName = StepName::Scanner;

/// Steps the executor pauses before instead of running.
pub fn interrupt_before(step: StepName) -> bool {
    matches!(step, StepName::WaitForUser)
}

/// The transition table. `Router` carries the only conditional edge.
pub fn next_edge(step: StepName) -> Edge {
    match step {
        StepName::Scanner => Edge::To(StepName::Interviewer),
        StepName::Interviewer => Edge::To(StepName::WaitForUser),
        StepName::WaitForUser => Edge::To(StepName::Router),
        StepName::Router => Edge::Branch(route_after_router),
        StepName::Writer => Edge::End,
    }
}

/// Conditional edge after `router`: `Draft` proceeds to the writer; anything
/// else, including an unset decision, loops back for another question.
fn route_after_router(state: &WorkflowState) -> StepName {
    match state.branch_decision {
        Some(BranchDecision::Draft) => StepName::Writer,
        _ => StepName::Interviewer,
    }
}
