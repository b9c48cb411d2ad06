//! The five workflow nodes. Each is a function from the current state (plus
//! collaborators) to a partial update; none of them writes to the state or
//! the session store directly.

pub mod interviewer;
pub mod router;
pub mod scanner;
pub mod wait;
pub mod writer;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::rag::RagError;

/// Failure of a single step. The executor aborts the walk on any of these
/// without committing the step's update.
#[derive(Debug, Error)]
pub enum StepError {
    /// A required field was absent at session start.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A field a prior step should have produced is unset.
    #[error("Precondition not met: {0}")]
    Precondition(String),

    /// The model reply did not contain the expected structured payload.
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    /// A model or retrieval call failed or timed out.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),
}

impl From<LlmError> for StepError {
    fn from(err: LlmError) -> Self {
        StepError::CollaboratorUnavailable(err.to_string())
    }
}

impl From<RagError> for StepError {
    fn from(err: RagError) -> Self {
        StepError::CollaboratorUnavailable(err.to_string())
    }
}
