//! Resume ingestion and retrieval.
//!
//! `ResumeRag` extracts text from an uploaded PDF, chunks it, embeds the
//! chunks through the LLM client, and stores them in the `resume_chunks`
//! table. Retrieval embeds the query and ranks stored chunks by cosine
//! similarity in process — the corpus is resume-sized, so a full scan stays
//! cheap and keeps the SQL trivial.

pub mod chunker;
pub mod extract;
pub mod similarity;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::llm_client::{LlmClient, LlmError};
use crate::rag::similarity::cosine_similarity;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] LlmError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),
}

/// Retrieval seam consumed by the writer node. Production uses `ResumeRag`;
/// tests script passages through a mock.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Best-effort top-k passages for the query, most similar first. May
    /// return fewer than k, including none.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, RagError>;
}

/// Outcome of ingesting one uploaded document.
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub resume_text: String,
    pub document_ids: Vec<String>,
}

/// Handles PDF ingestion and vector retrieval for resumes.
pub struct ResumeRag {
    pool: PgPool,
    llm: LlmClient,
}

impl ResumeRag {
    pub fn new(pool: PgPool, llm: LlmClient) -> Self {
        Self { pool, llm }
    }

    /// Extracts, chunks, embeds, and stores a resume. Returns the full text
    /// plus the ids of the stored chunks.
    pub async fn ingest_pdf(
        &self,
        bytes: &[u8],
        source_name: &str,
    ) -> Result<IngestResult, RagError> {
        let resume_text = extract::extract_text(bytes)?;
        let chunks = chunker::chunk_text(&resume_text, chunker::CHUNK_SIZE, chunker::CHUNK_OVERLAP);
        let embeddings = self.llm.embed(&chunks).await?;

        let mut document_ids = Vec::with_capacity(chunks.len());
        for (content, embedding) in chunks.iter().zip(embeddings) {
            let id = Uuid::new_v4();
            let embedding_json = serde_json::to_value(&embedding)?;
            sqlx::query(
                "INSERT INTO resume_chunks (id, source_label, content, embedding) VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(source_name)
            .bind(content)
            .bind(&embedding_json)
            .execute(&self.pool)
            .await?;
            document_ids.push(id.to_string());
        }

        info!(
            "Ingested {} chunks from {source_name}",
            document_ids.len()
        );
        Ok(IngestResult {
            resume_text,
            document_ids,
        })
    }
}

#[async_trait]
impl Retriever for ResumeRag {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, RagError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .llm
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                RagError::Retrieval("embedding service returned no vector".to_string())
            })?;

        let rows: Vec<(String, serde_json::Value)> =
            sqlx::query_as("SELECT content, embedding FROM resume_chunks")
                .fetch_all(&self.pool)
                .await?;

        let parsed = rows
            .into_iter()
            .filter_map(|(content, value)| {
                let embedding: Vec<f32> = serde_json::from_value(value).ok()?;
                Some((content, embedding))
            })
            .collect();

        Ok(rank_by_similarity(&query_embedding, parsed, k))
    }
}

/// Ranks candidate passages by cosine similarity to the query vector and
/// keeps the top k.
fn rank_by_similarity(query: &[f32], candidates: Vec<(String, Vec<f32>)>, k: usize) -> Vec<String> {
    let mut scored: Vec<(f32, String)> = candidates
        .into_iter()
        .map(|(content, embedding)| (cosine_similarity(query, &embedding), content))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(k)
        .map(|(_, content)| content)
        .collect()
}
