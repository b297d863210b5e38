use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A chat session as the front-end sees it.
///
/// Timestamps are Unix epoch seconds with sub-second precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub agent: Option<String>,
    pub title: String,
    pub created_at: f64,
    pub last_updated: f64,
}

fn now_epoch_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Process-lifetime session store keyed by session id.
///
/// Iteration follows insertion order. Nothing is evicted and nothing survives
/// a restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: IndexMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// All sessions in creation order.
    pub fn list(&self) -> Vec<Session> {
        self.sessions.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).cloned()
    }

    /// Create a new session. A missing or empty title becomes
    /// `Session <first 8 chars of id>`.
    pub fn create(&mut self, agent: Option<&str>, title: Option<&str>) -> Session {
        let id = Uuid::new_v4().to_string();
        let title = match title {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Session {}", &id[..8]),
        };
        let now = now_epoch_secs();
        let session = Session {
            id: id.clone(),
            agent: agent.map(str::to_string),
            title,
            created_at: now,
            last_updated: now,
        };
        self.sessions.insert(id, session.clone());
        info!(id = %session.id, title = %session.title, "session created");
        session
    }

    /// Bump `last_updated` to now. Returns `None` for an unknown id.
    pub fn touch(&mut self, id: &str) -> Option<Session> {
        let session = self.sessions.get_mut(id)?;
        session.last_updated = now_epoch_secs().max(session.created_at);
        Some(session.clone())
    }

    /// Remove one session, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.sessions.shift_remove(id).is_some();
        if removed {
            info!(id = %id, "session deleted");
        }
        removed
    }

    /// Drop every session. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        info!(count, "sessions cleared");
        count
    }
}
