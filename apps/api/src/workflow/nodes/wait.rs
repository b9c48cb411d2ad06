//! Wait-for-user — the interrupt point.
//!
//! The executor pauses *before* this step; by the time it runs, the caller's
//! fresh `user_response` has been merged into the state. All it does is fold
//! that answer into the transcript.

use crate::workflow::state::{ChatTurn, StateUpdate, WorkflowState};

pub fn run(state: &WorkflowState) -> StateUpdate {
    let answer = state.user_response.trim();
    if answer.is_empty() {
        return StateUpdate::default();
    }

    StateUpdate {
        chat_log: Some(state.chat_log_with(ChatTurn::user(answer))),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_is_noop_without_response() {
        let state = WorkflowState {
            chat_log: vec![ChatTurn::assistant("question")],
            ..Default::default()
        };
        assert_eq!(run(&state), StateUpdate::default());
    }

    #[test]
    fn test_wait_appends_trimmed_user_turn() {
        let state = WorkflowState {
            chat_log: vec![ChatTurn::assistant("question")],
            user_response: "  we cut deploy time by 40%  ".to_string(),
            ..Default::default()
        };

        let update = run(&state);
        let log = update.chat_log.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1], ChatTurn::user("we cut deploy time by 40%"));
    }
}
