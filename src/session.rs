use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(id: String, system_prompt: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            turns: vec![Turn::system(system_prompt)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Append turns in order, then trim.
    ///
    /// Trim policy: the leading system turn is never evicted; beyond it, only
    /// the most recent `2 * max_history` turns (`max_history` user/assistant
    /// pairs) are retained, so the turn count is bounded by
    /// `2 * max_history + 1` after every append.
    pub fn append(&mut self, turns: impl IntoIterator<Item = Turn>, max_history: usize) {
        self.turns.extend(turns);
        self.updated_at = Utc::now();

        let keep = max_history * 2;
        let has_system = matches!(self.turns.first(), Some(t) if t.role == Role::System);
        let tail_len = self.turns.len() - usize::from(has_system);

        if tail_len > keep {
            let drop = tail_len - keep;
            let start = usize::from(has_system);
            self.turns.drain(start..start + drop);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub total_conversations: usize,
    pub total_messages: usize,
}

/// In-memory conversation store.
///
/// Each session sits behind its own `Mutex`, so a caller can hold a session
/// locked for a full read-transcript/append cycle without blocking other
/// conversations.
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
    system_prompt: String,
}

impl SessionStore {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Resolve a conversation id to its session, creating one (seeded with
    /// the system turn) when the id is unknown or absent.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, Arc<Mutex<Session>>) {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => generate_conversation_id(),
        };

        let session = self
            .sessions
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(id.clone(), &self.system_prompt))))
            .clone();

        (id, session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Returns false when the id is unknown.
    pub fn delete(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub async fn stats(&self) -> StoreStats {
        // Snapshot the handles before awaiting; a map shard guard must not
        // be held across a lock on a session that is mid-turn.
        let sessions: Vec<Arc<Mutex<Session>>> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let mut total_messages = 0;
        for session in &sessions {
            total_messages += session.lock().await.turns.len();
        }
        StoreStats {
            total_conversations: sessions.len(),
            total_messages,
        }
    }
}

/// Timestamp-derived id with a uuid suffix to keep collisions out of the way.
fn generate_conversation_id() -> String {
    format!(
        "conv_{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        Uuid::new_v4().as_simple()
    )
}
