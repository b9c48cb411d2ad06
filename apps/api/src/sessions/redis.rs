//! Redis-backed session store: one JSON value per `session:{id}` key.
//! Redis gives per-key atomic SET/GET, which is exactly the contract the
//! store promises; durability depends on the server's persistence config.

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::sessions::{Checkpoint, SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "session:";

pub struct RedisSessionStore {
    client: redis::Client,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn key(session_id: &str) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }
}

impl From<redis::RedisError> for SessionStoreError {
    fn from(err: redis::RedisError) -> Self {
        SessionStoreError::Storage(err.to_string())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(
        &self,
        session_id: &str,
        checkpoint: &Checkpoint,
    ) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(checkpoint)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(Self::key(session_id), payload).await?;
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<Checkpoint>, SessionStoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(Self::key(session_id)).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
