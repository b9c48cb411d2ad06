//! Workflow state — the record threaded through every step of the graph.
//!
//! Steps never mutate `WorkflowState` directly: they return a `StateUpdate`
//! carrying only the fields they changed, and the executor applies it with
//! replace-the-whole-value semantics. Appending to `chat_log` therefore means
//! reading the current log, building the full new vector, and returning it
//! whole (`chat_log_with`).

use serde::{Deserialize, Serialize};

/// Lifecycle of one interrogation session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Interviewing,
    Drafting,
    Completed,
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The weak bullet the scanner picked out of the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeTarget {
    /// Original bullet that needs improvement.
    pub text: String,
    /// Key detail the bullet is missing (metrics, scope, impact).
    pub missing: String,
}

/// Router verdict on whether the collected detail is enough to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchDecision {
    Draft,
    Followup,
}

/// Full session state. Every field starts empty/absent and is filled in by
/// the steps that own it; a checkpoint snapshots this struct verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub resume_text: String,
    pub vector_doc_ids: Vec<String>,
    pub current_target: Option<ResumeTarget>,
    pub status: SessionStatus,
    pub chat_log: Vec<ChatTurn>,
    pub pending_question: Option<String>,
    pub user_response: String,
    pub final_bullet: Option<String>,
    pub branch_decision: Option<BranchDecision>,
    pub round_count: u32,
}

impl WorkflowState {
    /// Returns the chat log with one more turn appended. Steps use this to
    /// build the full replacement vector a `StateUpdate` must carry.
    pub fn chat_log_with(&self, turn: ChatTurn) -> Vec<ChatTurn> {
        let mut log = self.chat_log.clone();
        log.push(turn);
        log
    }

    /// Applies a partial update. Each present field overwrites the current
    /// value entirely; absent fields are untouched.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(v) = update.resume_text {
            self.resume_text = v;
        }
        if let Some(v) = update.vector_doc_ids {
            self.vector_doc_ids = v;
        }
        if let Some(v) = update.current_target {
            self.current_target = Some(v);
        }
        if let Some(v) = update.status {
            self.status = v;
        }
        if let Some(v) = update.chat_log {
            self.chat_log = v;
        }
        if let Some(v) = update.pending_question {
            self.pending_question = v;
        }
        if let Some(v) = update.user_response {
            self.user_response = v;
        }
        if let Some(v) = update.final_bullet {
            self.final_bullet = Some(v);
        }
        if let Some(v) = update.branch_decision {
            self.branch_decision = Some(v);
        }
        if let Some(v) = update.round_count {
            self.round_count = v;
        }
    }
}

/// Partial state update returned by a step: only the fields the step changed.
///
/// `pending_question` is doubly wrapped so a step can distinguish "leave it"
/// (`None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub resume_text: Option<String>,
    pub vector_doc_ids: Option<Vec<String>>,
    pub current_target: Option<ResumeTarget>,
    pub status: Option<SessionStatus>,
    pub chat_log: Option<Vec<ChatTurn>>,
    pub pending_question: Option<Option<String>>,
    pub user_response: Option<String>,
    pub final_bullet: Option<String>,
    pub branch_decision: Option<BranchDecision>,
    pub round_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let mut state = WorkflowState {
            resume_text: "original".to_string(),
            round_count: 2,
            ..Default::default()
        };

        state.apply(StateUpdate {
            status: Some(SessionStatus::Interviewing),
            ..Default::default()
        });

        assert_eq!(state.status, SessionStatus::Interviewing);
        assert_eq!(state.resume_text, "original");
        assert_eq!(state.round_count, 2);
    }

    #[test]
    fn test_apply_replaces_chat_log_wholesale() {
        let mut state = WorkflowState {
            chat_log: vec![ChatTurn::assistant("q1")],
            ..Default::default()
        };

        let replacement = vec![ChatTurn::assistant("q1"), ChatTurn::user("a1")];
        state.apply(StateUpdate {
            chat_log: Some(replacement.clone()),
            ..Default::default()
        });

        assert_eq!(state.chat_log, replacement);
    }

    #[test]
    fn test_chat_log_with_appends_without_mutating() {
        let state = WorkflowState {
            chat_log: vec![ChatTurn::assistant("q1")],
            ..Default::default()
        };

        let extended = state.chat_log_with(ChatTurn::user("a1"));

        assert_eq!(extended.len(), 2);
        assert_eq!(state.chat_log.len(), 1);
        assert_eq!(extended[1], ChatTurn::user("a1"));
    }

    #[test]
    fn test_pending_question_can_be_cleared_explicitly() {
        let mut state = WorkflowState {
            pending_question: Some("What changed?".to_string()),
            ..Default::default()
        };

        // None leaves the question alone; Some(None) clears it.
        state.apply(StateUpdate::default());
        assert!(state.pending_question.is_some());

        state.apply(StateUpdate {
            pending_question: Some(None),
            ..Default::default()
        });
        assert!(state.pending_question.is_none());
    }

    #[test]
    fn test_state_serde_round_trip() {
        let state = WorkflowState {
            resume_text: "Led a migration project".to_string(),
            vector_doc_ids: vec!["d1".to_string(), "d2".to_string()],
            current_target: Some(ResumeTarget {
                text: "Led a migration project".to_string(),
                missing: "impact/metrics".to_string(),
            }),
            status: SessionStatus::Interviewing,
            chat_log: vec![ChatTurn::assistant("How many engineers?")],
            pending_question: Some("How many engineers?".to_string()),
            user_response: String::new(),
            final_bullet: None,
            branch_decision: Some(BranchDecision::Followup),
            round_count: 1,
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: WorkflowState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
