//! Conversation sessions

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cryptobot_core::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State accumulated for one chat/user pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub conversation_id: String,
    pub chat_id: i64,
    pub user_id: i64,
    pub data: Context,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(conversation_id: impl Into<String>, chat_id: i64, user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            conversation_id: conversation_id.into(),
            chat_id,
            user_id,
            data: Context::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Durable mapping from conversation id to session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Session for `conversation_id`, `None` when never written
    async fn get(&self, conversation_id: &str) -> Result<Option<Session>>;

    /// Store `session` under `conversation_id`, replacing any previous value
    async fn set(&self, conversation_id: &str, session: &Session) -> Result<()>;
}

/// Process-local store, lost on restart
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, conversation_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(conversation_id).cloned())
    }

    async fn set(&self, conversation_id: &str, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(conversation_id.to_string(), session.clone());
        Ok(())
    }
}

/// A store whose reads and writes always fail
///
/// Used to exercise the error boundary of the dispatcher.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct UnavailableSessionStore;

#[cfg(test)]
#[async_trait]
impl SessionStore for UnavailableSessionStore {
    async fn get(&self, _conversation_id: &str) -> Result<Option<Session>> {
        Err(crate::error::BotError::Session(
            "store unavailable".to_string(),
        ))
    }

    async fn set(&self, _conversation_id: &str, _session: &Session) -> Result<()> {
        Err(crate::error::BotError::Session(
            "store unavailable".to_string(),
        ))
    }
}
