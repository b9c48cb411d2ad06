//! Interviewer — asks one clarifying question about the target bullet.

use crate::llm_client::ChatModel;
use crate::workflow::nodes::StepError;
use crate::workflow::prompts::{INTERVIEWER_PROMPT_TEMPLATE, INTERVIEWER_SYSTEM};
use crate::workflow::state::{ChatTurn, SessionStatus, StateUpdate, WorkflowState};

pub async fn run(state: &WorkflowState, llm: &dyn ChatModel) -> Result<StateUpdate, StepError> {
    let target = state.current_target.as_ref().ok_or_else(|| {
        StepError::Precondition("interviewer cannot run without a current target".to_string())
    })?;

    let prompt = INTERVIEWER_PROMPT_TEMPLATE
        .replace("{text}", &target.text)
        .replace("{missing}", &target.missing);
    let question = llm
        .complete(INTERVIEWER_SYSTEM, &prompt)
        .await?
        .trim()
        .to_string();

    Ok(StateUpdate {
        pending_question: Some(Some(question.clone())),
        chat_log: Some(state.chat_log_with(ChatTurn::assistant(question))),
        round_count: Some(state.round_count + 1),
        status: Some(SessionStatus::Interviewing),
        ..Default::default()
    })
}
