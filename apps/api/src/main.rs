mod config;
mod db;
mod errors;
mod llm_client;
mod rag;
mod routes;
mod sessions;
mod state;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::LlmClient;
use crate::rag::ResumeRag;
use crate::routes::build_router;
use crate::sessions::memory::InMemorySessionStore;
use crate::sessions::redis::RedisSessionStore;
use crate::sessions::SessionStore;
use crate::state::AppState;
use crate::workflow::executor::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting STAR Interrogator API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and the chunk table
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Session store: Redis by default, in-memory for local development
    let store: Arc<dyn SessionStore> = match config.session_store.as_str() {
        "memory" => {
            warn!("Using in-memory session store; sessions will not survive a restart");
            Arc::new(InMemorySessionStore::new())
        }
        _ => {
            let client = redis::Client::open(config.redis_url.clone())?;
            info!("Redis session store initialized");
            Arc::new(RedisSessionStore::new(client))
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        config.embedding_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.chat_model());

    // Retrieval index and the compiled workflow
    let rag = Arc::new(ResumeRag::new(db, llm.clone()));
    let workflow = Arc::new(Workflow::new(Arc::new(llm), rag.clone(), store));

    // Build app state
    let state = AppState { workflow, rag };

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origin.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
