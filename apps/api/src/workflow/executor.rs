//! Graph executor: walks the static topology, applies step updates, persists
//! a checkpoint after every completed step, and pauses at the interrupt
//! point until the caller comes back with fresh input.
//!
//! One `invoke` is one synchronous walk: from the session's recorded next
//! step to either the interrupt point or the terminal step. Suspension is a
//! hard stop between two invocations — state crosses the process boundary
//! only through the session store.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::ChatModel;
use crate::rag::Retriever;
use crate::sessions::{Checkpoint, SessionStore, SessionStoreError};
use crate::workflow::graph::{interrupt_before, next_edge, Edge, StepName, ENTRY_STEP};
use crate::workflow::nodes::{self, StepError};
use crate::workflow::state::{StateUpdate, WorkflowState};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Step(#[from] StepError),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),

    #[error("Session {0} is already completed")]
    Completed(String),
}

/// The compiled workflow: topology plus collaborators. One instance serves
/// every session; all per-session state lives in the store.
pub struct Workflow {
    llm: Arc<dyn ChatModel>,
    retriever: Arc<dyn Retriever>,
    store: Arc<dyn SessionStore>,
}

impl Workflow {
    pub fn new(
        llm: Arc<dyn ChatModel>,
        retriever: Arc<dyn Retriever>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            llm,
            retriever,
            store,
        }
    }

    /// Runs one walk for the session: create or resume, merge the caller's
    /// input, then execute steps until the next interrupt or terminal step.
    ///
    /// A checkpoint is written only after a step completes, so any step
    /// failure aborts the invocation with the previous checkpoint intact and
    /// the caller free to resubmit.
    pub async fn invoke(
        &self,
        session_id: &str,
        input: StateUpdate,
    ) -> Result<WorkflowState, WorkflowError> {
        let (mut state, mut cursor, resumed) = match self.store.load(session_id).await? {
            Some(checkpoint) => {
                let next = checkpoint
                    .next_step
                    .ok_or_else(|| WorkflowError::Completed(session_id.to_string()))?;
                let mut state = checkpoint.state;
                state.apply(input);
                debug!(%session_id, step = %next, "resuming session");
                (state, next, true)
            }
            None => {
                let mut state = WorkflowState::default();
                state.apply(input);
                debug!(%session_id, "creating session");
                (state, ENTRY_STEP, false)
            }
        };

        // The step we resumed onto runs first, consuming the caller's fresh
        // input; the interrupt check only applies when the cursor arrives at
        // the interrupt step by traversing an edge.
        let mut skip_interrupt = resumed;

        loop {
            if interrupt_before(cursor) && !skip_interrupt {
                self.store
                    .save(session_id, &Checkpoint::new(state.clone(), Some(cursor)))
                    .await?;
                info!(%session_id, step = %cursor, "paused for user input");
                return Ok(state);
            }
            skip_interrupt = false;

            debug!(%session_id, step = %cursor, "running step");
            let update = self.run_step(cursor, &state).await?;
            state.apply(update);

            let next = match next_edge(cursor) {
                Edge::To(next) => Some(next),
                Edge::Branch(route) => Some(route(&state)),
                Edge::End => None,
            };

            self.store
                .save(session_id, &Checkpoint::new(state.clone(), next))
                .await?;

            match next {
                Some(next_step) => cursor = next_step,
                None => {
                    info!(%session_id, "session completed");
                    return Ok(state);
                }
            }
        }
    }

    async fn run_step(
        &self,
        step: StepName,
        state: &WorkflowState,
    ) -> Result<StateUpdate, StepError> {
        match step {
            StepName::Scanner => nodes::scanner::run(state, self.llm.as_ref()).await,
            StepName::Interviewer => nodes::interviewer::run(state, self.llm.as_ref()).await,
            StepName::WaitForUser => Ok(nodes::wait::run(state)),
            StepName::Router => nodes::router::run(state, self.llm.as_ref()).await,
            StepName::Writer => {
                nodes::writer::run(state, self.llm.as_ref(), self.retriever.as_ref()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::memory::InMemorySessionStore;
    use crate::workflow::nodes::testing::{MockChat, MockRetriever};
    use crate::workflow::state::{Role, SessionStatus};

    const SCANNER_REPLY: &str =
        r#"{"text": "Led a migration project", "missing": "impact/metrics"}"#;
    const QUESTION: &str = "What was the measurable impact, and for how many people?";
    const BULLET: &str =
        "Spearheaded a CI/CD migration that cut deploy time 40% for a 12-engineer team";

    fn initial_update(resume: &str) -> StateUpdate {
        StateUpdate {
            resume_text: Some(resume.to_string()),
            vector_doc_ids: Some(vec!["doc-1".to_string()]),
            status: Some(SessionStatus::Idle),
            chat_log: Some(Vec::new()),
            round_count: Some(0),
            ..Default::default()
        }
    }

    fn continue_update(message: &str) -> StateUpdate {
        StateUpdate {
            user_response: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn workflow_with(
        llm: Arc<MockChat>,
        store: Arc<InMemorySessionStore>,
    ) -> Workflow {
        Workflow::new(
            llm,
            Arc::new(MockRetriever::with_passages(["Owned the Jenkins pipeline"])),
            store,
        )
    }

    async fn start_session(store: &Arc<InMemorySessionStore>) -> WorkflowState {
        let llm = Arc::new(MockChat::scripted([SCANNER_REPLY, QUESTION]));
        let workflow = workflow_with(llm, store.clone());
        workflow
            .invoke("s1", initial_update("- Led a migration project"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_session_runs_to_interrupt_and_pauses() {
        let store = Arc::new(InMemorySessionStore::new());
        let llm = Arc::new(MockChat::scripted([SCANNER_REPLY, QUESTION]));
        let workflow = workflow_with(llm.clone(), store.clone());

        let state = workflow
            .invoke("s1", initial_update("- Led a migration project"))
            .await
            .unwrap();

        assert_eq!(state.status, SessionStatus::Interviewing);
        assert_eq!(state.pending_question.as_deref(), Some(QUESTION));
        assert_eq!(
            state.current_target.as_ref().unwrap().text,
            "Led a migration project"
        );
        assert_eq!(state.round_count, 1);
        assert_eq!(state.chat_log.len(), 1);
        assert_eq!(llm.calls(), 2);

        let checkpoint = store.load("s1").await.unwrap().unwrap();
        assert_eq!(checkpoint.next_step, Some(StepName::WaitForUser));
        assert_eq!(checkpoint.state, state);
    }

    #[tokio::test]
    async fn test_detailed_answer_reaches_writer_and_completes() {
        let store = Arc::new(InMemorySessionStore::new());
        start_session(&store).await;

        let llm = Arc::new(MockChat::scripted(["DRAFT", BULLET]));
        let workflow = workflow_with(llm.clone(), store.clone());

        let state = workflow
            .invoke(
                "s1",
                continue_update("we cut deploy time by 40% for 12 engineers"),
            )
            .await
            .unwrap();

        assert_eq!(state.status, SessionStatus::Completed);
        assert!(state.final_bullet.as_deref().unwrap().contains("40%"));
        assert!(state.pending_question.is_none());
        assert!(state.user_response.is_empty());
        // question, answer, bullet
        assert_eq!(state.chat_log.len(), 3);
        assert_eq!(state.chat_log[1].role, Role::User);
        assert_eq!(llm.calls(), 2);

        let checkpoint = store.load("s1").await.unwrap().unwrap();
        assert_eq!(checkpoint.next_step, None);
    }

    #[tokio::test]
    async fn test_vague_answer_loops_back_to_interviewer() {
        let store = Arc::new(InMemorySessionStore::new());
        start_session(&store).await;

        let followup_question = "Can you quantify the result in time or cost?";
        let llm = Arc::new(MockChat::scripted(["FOLLOWUP", followup_question]));
        let workflow = workflow_with(llm.clone(), store.clone());

        let state = workflow
            .invoke("s1", continue_update("it went well"))
            .await
            .unwrap();

        assert_eq!(state.status, SessionStatus::Interviewing);
        assert_eq!(state.pending_question.as_deref(), Some(followup_question));
        assert_eq!(state.round_count, 2);
        assert!(state.final_bullet.is_none());
        // first question, answer, second question
        assert_eq!(state.chat_log.len(), 3);

        let checkpoint = store.load("s1").await.unwrap().unwrap();
        assert_eq!(checkpoint.next_step, Some(StepName::WaitForUser));
    }

    #[tokio::test]
    async fn test_completed_session_rejects_further_input() {
        let store = Arc::new(InMemorySessionStore::new());
        start_session(&store).await;

        let llm = Arc::new(MockChat::scripted(["DRAFT", BULLET]));
        let workflow = workflow_with(llm, store.clone());
        workflow
            .invoke("s1", continue_update("we cut deploy time by 40%"))
            .await
            .unwrap();

        let llm = Arc::new(MockChat::unreachable());
        let workflow = workflow_with(llm, store.clone());
        let err = workflow
            .invoke("s1", continue_update("one more thing"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Completed(_)));
        // Terminal checkpoint untouched by the rejected invocation.
        let checkpoint = store.load("s1").await.unwrap().unwrap();
        assert_eq!(checkpoint.next_step, None);
        assert_eq!(checkpoint.state.status, SessionStatus::Completed);
    }

    #[tokio::test]
    async fn test_scanner_failure_writes_no_checkpoint() {
        let store = Arc::new(InMemorySessionStore::new());
        let llm = Arc::new(MockChat::scripted(["no structured payload here"]));
        let workflow = workflow_with(llm, store.clone());

        let err = workflow
            .invoke("s1", initial_update("- Led a migration project"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Step(StepError::MalformedModelOutput(_))
        ));
        assert!(store.load("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_resume_text_fails_before_any_write() {
        let store = Arc::new(InMemorySessionStore::new());
        let llm = Arc::new(MockChat::unreachable());
        let workflow = workflow_with(llm, store.clone());

        let err = workflow
            .invoke("s1", initial_update("   "))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Step(StepError::MissingInput(_))
        ));
        assert!(store.load("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mid_walk_failure_is_retryable_from_last_checkpoint() {
        let store = Arc::new(InMemorySessionStore::new());
        start_session(&store).await;

        // Router's model call fails; the wait step before it already
        // committed, so the checkpoint now points at the router.
        let llm = Arc::new(MockChat::scripted(Vec::<String>::new()).then_fail("boom"));
        let workflow = workflow_with(llm, store.clone());
        let err = workflow
            .invoke("s1", continue_update("we cut deploy time by 40%"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Step(StepError::CollaboratorUnavailable(_))
        ));

        let checkpoint = store.load("s1").await.unwrap().unwrap();
        assert_eq!(checkpoint.next_step, Some(StepName::Router));
        assert_eq!(checkpoint.state.chat_log.len(), 2);

        // Resubmitting the same message resumes at the router and finishes
        // without replaying the wait step.
        let llm = Arc::new(MockChat::scripted(["DRAFT", BULLET]));
        let workflow = workflow_with(llm, store.clone());
        let state = workflow
            .invoke("s1", continue_update("we cut deploy time by 40%"))
            .await
            .unwrap();

        assert_eq!(state.status, SessionStatus::Completed);
        assert_eq!(state.chat_log.len(), 3);
    }

    #[tokio::test]
    async fn test_chat_log_never_shrinks_across_invocations() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut last_len = start_session(&store).await.chat_log.len();

        let llm = Arc::new(MockChat::scripted(["FOLLOWUP", "Second question?"]));
        let workflow = workflow_with(llm, store.clone());
        let state = workflow
            .invoke("s1", continue_update("it went well"))
            .await
            .unwrap();
        assert!(state.chat_log.len() >= last_len);
        last_len = state.chat_log.len();

        let llm = Arc::new(MockChat::scripted(["DRAFT", BULLET]));
        let workflow = workflow_with(llm, store.clone());
        let state = workflow
            .invoke("s1", continue_update("40% faster for 12 engineers"))
            .await
            .unwrap();
        assert!(state.chat_log.len() >= last_len);
    }

    #[tokio::test]
    async fn test_sessions_run_independently() {
        let store = Arc::new(InMemorySessionStore::new());
        start_session(&store).await;

        let llm = Arc::new(MockChat::scripted([SCANNER_REPLY, QUESTION]));
        let workflow = workflow_with(llm, store.clone());
        workflow
            .invoke("s2", initial_update("- Led a migration project"))
            .await
            .unwrap();

        let s1 = store.load("s1").await.unwrap().unwrap();
        let s2 = store.load("s2").await.unwrap().unwrap();
        assert_eq!(s1.next_step, Some(StepName::WaitForUser));
        assert_eq!(s2.next_step, Some(StepName::WaitForUser));
        assert_eq!(store.len().await, 2);
    }
}
