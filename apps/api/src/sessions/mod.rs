//! Durable session persistence.
//!
//! A session is identified by an opaque token and owns exactly one
//! checkpoint: the full state snapshot plus the next step to run. The
//! checkpoint is the only artifact needed to resume — it must load without
//! any other in-memory context.

pub mod handlers;
pub mod memory;
pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workflow::graph::StepName;
use crate::workflow::state::WorkflowState;

/// Persisted (state, next step) pair. `next_step == None` marks a completed
/// session: there is nothing left to resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub state: WorkflowState,
    pub next_step: Option<StepName>,
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(state: WorkflowState, next_step: Option<StepName>) -> Self {
        Self {
            state,
            next_step,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Key-value persistence for checkpoints.
///
/// `save` is an atomic overwrite per session id. Concurrent operations on
/// *different* ids never interfere; concurrent saves to the *same* id are
/// last-writer-wins — the HTTP layer is expected to serialize requests per
/// session, and the store does not add cross-request locking.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session_id: &str, checkpoint: &Checkpoint)
        -> Result<(), SessionStoreError>;

    async fn load(&self, session_id: &str) -> Result<Option<Checkpoint>, SessionStoreError>;
}
