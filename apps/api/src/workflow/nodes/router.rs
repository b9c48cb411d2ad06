//! Router — decides whether the collected detail is enough to draft.

use crate::llm_client::ChatModel;
use crate::workflow::nodes::StepError;
use crate::workflow::prompts::{ROUTER_PROMPT_TEMPLATE, ROUTER_SYSTEM};
use crate::workflow::state::{BranchDecision, StateUpdate, WorkflowState};

pub async fn run(state: &WorkflowState, llm: &dyn ChatModel) -> Result<StateUpdate, StepError> {
    let answer = state.user_response.trim();

    // Nothing to judge: no model call needed.
    let decision = if answer.is_empty() {
        BranchDecision::Followup
    } else {
        let prompt = ROUTER_PROMPT_TEMPLATE
            .replace("{question}", state.pending_question.as_deref().unwrap_or(""))
            .replace("{answer}", answer);
        let reply = llm.complete(ROUTER_SYSTEM, &prompt).await?;
        parse_decision(&reply)
    };

    Ok(StateUpdate {
        branch_decision: Some(decision),
        ..Default::default()
    })
}

/// Case-insensitive substring test for the draft token; everything else,
/// including garbage, means another follow-up question.
fn parse_decision(reply: &str) -> BranchDecision {
    if reply.to_uppercase().contains("DRAFT") {
        BranchDecision::Draft
    } else {
        BranchDecision::Followup
    }
}
