// src/services/session_manager.rs
// In-memory overlay sessions. Nothing here is persisted.
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

use crate::message::{ChatMessage, MessageRole};

pub const DEFAULT_MAX_MESSAGES: usize = 200;

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub messages: Vec<ChatMessage>,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), messages: Vec::new(), last_active: Instant::now() }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
    max_messages: usize,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("max_messages", &self.max_messages)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self::with_limit(ttl, DEFAULT_MAX_MESSAGES)
    }

    /// Keep at most `max_messages` per transcript; older ones are dropped.
    pub fn with_limit(ttl: Duration, max_messages: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_messages: max_messages.max(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // Append a message to a session's transcript and touch last_active.
    pub async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: impl Into<String>,
    ) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        entry.messages.push(ChatMessage::new(role, content));
        if entry.messages.len() > self.max_messages {
            let excess = entry.messages.len() - self.max_messages;
            entry.messages.drain(..excess);
        }
        entry.last_active = Instant::now();
        entry.messages.len()
    }

    /// Get a copy of the session transcript
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.messages.clone())
    }

    /// End a session, dropping its transcript
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }
}
