//! Scanner — picks the single weakest bullet out of the resume text.

use crate::llm_client::ChatModel;
use crate::workflow::nodes::StepError;
use crate::workflow::prompts::{SCANNER_PROMPT_TEMPLATE, SCANNER_SYSTEM};
use crate::workflow::state::{ResumeTarget, SessionStatus, StateUpdate, WorkflowState};

pub async fn run(state: &WorkflowState, llm: &dyn ChatModel) -> Result<StateUpdate, StepError> {
    if state.resume_text.trim().is_empty() {
        return Err(StepError::MissingInput(
            "resume text missing in state".to_string(),
        ));
    }

    let prompt = SCANNER_PROMPT_TEMPLATE.replace("{resume}", &state.resume_text);
    let reply = llm.complete(SCANNER_SYSTEM, &prompt).await?;
    let target = parse_target(&reply)?;

    Ok(StateUpdate {
        current_target: Some(target),
        status: Some(SessionStatus::Interviewing),
        ..Default::default()
    })
}

/// Pulls the `{"text": ..., "missing": ...}` object out of a free-text reply:
/// everything from the first `{` to the last `}` must parse as the target.
fn parse_target(reply: &str) -> Result<ResumeTarget, StepError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let payload = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            return Err(StepError::MalformedModelOutput(format!(
                "scanner reply contains no JSON object: {reply}"
            )))
        }
    };

    serde_json::from_str(payload).map_err(|e| {
        StepError::MalformedModelOutput(format!("scanner reply not valid target JSON: {e}"))
    })
}
