use std::sync::Arc;

use crate::rag::ResumeRag;
use crate::workflow::executor::Workflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<Workflow>,
    pub rag: Arc<ResumeRag>,
}
