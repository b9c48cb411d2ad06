//! In-memory session store. Not persistent across restarts; used for local
//! development without Redis (`SESSION_STORE=memory`) and throughout the
//! test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::sessions::{Checkpoint, SessionStore, SessionStoreError};

#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<String, Checkpoint>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (test helper).
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(
        &self,
        session_id: &str,
        checkpoint: &Checkpoint,
    ) -> Result<(), SessionStoreError> {
        self.inner
            .write()
            .await
            .insert(session_id.to_string(), checkpoint.clone());
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<Checkpoint>, SessionStoreError> {
        Ok(self.inner.read().await.get(session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::graph::StepName;
    use crate::workflow::state::{ChatTurn, SessionStatus, WorkflowState};

    fn sample_checkpoint() -> Checkpoint {
        Checkpoint::new(
            WorkflowState {
                resume_text: "Led a migration project".to_string(),
                status: SessionStatus::Interviewing,
                chat_log: vec![ChatTurn::assistant("How many engineers?")],
                round_count: 1,
                ..Default::default()
            },
            Some(StepName::WaitForUser),
        )
    }

    #[tokio::test]
    async fn test_load_after_save_returns_identical_checkpoint() {
        let store = InMemorySessionStore::new();
        let checkpoint = sample_checkpoint();

        store.save("s1", &checkpoint).await.unwrap();
        let loaded = store.load("s1").await.unwrap().unwrap();

        assert_eq!(loaded, checkpoint);
    }

    #[tokio::test]
    async fn test_load_unknown_session_is_absent() {
        let store = InMemorySessionStore::new();
        assert!(store.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_checkpoint() {
        let store = InMemorySessionStore::new();
        let first = sample_checkpoint();
        let second = Checkpoint::new(first.state.clone(), None);

        store.save("s1", &first).await.unwrap();
        store.save("s1", &second).await.unwrap();

        let loaded = store.load("s1").await.unwrap().unwrap();
        assert_eq!(loaded.next_step, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_do_not_interfere() {
        let store = InMemorySessionStore::new();
        let checkpoint = sample_checkpoint();

        store.save("s1", &checkpoint).await.unwrap();
        store
            .save("s2", &Checkpoint::new(WorkflowState::default(), None))
            .await
            .unwrap();

        let s1 = store.load("s1").await.unwrap().unwrap();
        assert_eq!(s1.next_step, Some(StepName::WaitForUser));
        let s2 = store.load("s2").await.unwrap().unwrap();
        assert_eq!(s2.next_step, None);
    }
}
