#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::rag::RagError;
use crate::workflow::executor::WorkflowError;
use crate::workflow::nodes::StepError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Step(step) => step.into(),
            WorkflowError::Store(store) => AppError::Storage(store.to_string()),
            WorkflowError::Completed(id) => {
                AppError::Conflict(format!("Session {id} is already completed"))
            }
        }
    }
}

impl From<StepError> for AppError {
    fn from(err: StepError) -> Self {
        match err {
            // Absent at session start: the caller sent an unusable request.
            StepError::MissingInput(msg) => AppError::Validation(msg),
            StepError::Precondition(msg) => AppError::Precondition(msg),
            StepError::MalformedModelOutput(msg) | StepError::CollaboratorUnavailable(msg) => {
                AppError::Llm(msg)
            }
        }
    }
}

impl From<RagError> for AppError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Extraction(msg) => AppError::Validation(msg),
            RagError::Embedding(e) => AppError::Llm(e.to_string()),
            RagError::Database(e) => AppError::Database(e),
            RagError::Serialization(e) => AppError::Internal(anyhow::Error::new(e)),
            RagError::Retrieval(msg) => AppError::Llm(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "SESSION_COMPLETED", msg.clone()),
            AppError::Precondition(msg) => {
                tracing::error!("Precondition failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PRECONDITION_FAILED",
                    msg.clone(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Session store error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
