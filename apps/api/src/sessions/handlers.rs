//! HTTP handlers for the two session-mutating operations: start a session
//! from an uploaded resume, and continue it with a chat message.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::workflow::state::{ResumeTarget, SessionStatus, StateUpdate};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub question: Option<String>,
    pub current_target: Option<ResumeTarget>,
    pub status: SessionStatus,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub question: Option<String>,
    pub final_bullet: Option<String>,
    pub status: SessionStatus,
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(Vec<u8>, String)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !matches!(
            content_type.as_str(),
            "application/pdf" | "application/octet-stream"
        ) {
            return Err(AppError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        file = Some((bytes.to_vec(), file_name));
        break;
    }
    let (bytes, file_name) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    // Extraction failures are client errors and happen before any
    // checkpoint could be written.
    let ingest = state.rag.ingest_pdf(&bytes, &file_name).await?;

    let session_id = Uuid::new_v4().simple().to_string();
    let initial = StateUpdate {
        resume_text: Some(ingest.resume_text),
        vector_doc_ids: Some(ingest.document_ids),
        status: Some(SessionStatus::Idle),
        chat_log: Some(Vec::new()),
        round_count: Some(0),
        ..Default::default()
    };
    let result = state.workflow.invoke(&session_id, initial).await?;

    Ok(Json(UploadResponse {
        session_id,
        question: result.pending_question,
        current_target: result.current_target,
        status: result.status,
    }))
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let result = state
        .workflow
        .invoke(
            &req.session_id,
            StateUpdate {
                user_response: Some(req.message),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(ChatResponse {
        question: result.pending_question,
        final_bullet: result.final_bullet,
        status: result.status,
    }))
}
