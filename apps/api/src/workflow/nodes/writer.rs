//! Writer — drafts the final STAR bullet and closes the session.

use crate::llm_client::ChatModel;
use crate::rag::Retriever;
use crate::workflow::nodes::StepError;
use crate::workflow::prompts::{WRITER_PROMPT_TEMPLATE, WRITER_SYSTEM};
use crate::workflow::state::{ChatTurn, SessionStatus, StateUpdate, WorkflowState};

/// How many retrieved passages go into the drafting prompt.
const TOP_K: usize = 4;

pub async fn run(
    state: &WorkflowState,
    llm: &dyn ChatModel,
    retriever: &dyn Retriever,
) -> Result<StateUpdate, StepError> {
    let target = state.current_target.as_ref().ok_or_else(|| {
        StepError::Precondition("writer requires a scanned target bullet".to_string())
    })?;
    let answer = state.user_response.trim();
    if answer.is_empty() {
        return Err(StepError::Precondition(
            "writer requires a user answer".to_string(),
        ));
    }

    let passages = retriever.retrieve(&target.text, TOP_K).await?;
    let context = if passages.is_empty() {
        "(no extra context)".to_string()
    } else {
        passages.join("\n---\n")
    };

    let prompt = WRITER_PROMPT_TEMPLATE
        .replace("{text}", &target.text)
        .replace("{missing}", &target.missing)
        .replace("{resume}", &state.resume_text)
        .replace("{context}", &context)
        .replace("{answer}", answer);
    let bullet = llm
        .complete(WRITER_SYSTEM, &prompt)
        .await?
        .trim()
        .to_string();

    // Session is finished: reset the conversational fields explicitly.
    Ok(StateUpdate {
        final_bullet: Some(bullet.clone()),
        chat_log: Some(state.chat_log_with(ChatTurn::assistant(bullet))),
        status: Some(SessionStatus::Completed),
        pending_question: Some(None),
        user_response: Some(String::new()),
        ..Default::default()
    })
}
