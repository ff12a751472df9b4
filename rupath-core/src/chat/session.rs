use hashbrown::HashMap;
use serde::Serialize;

pub const DEFAULT_SESSION_ID: &str = "default";

/// Topic a conversation is currently about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Parking,
    Bus,
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub mode: Option<Mode>,
}

/// Conversation state per session id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session id to use for a request; blank or missing ids share one session
    pub fn session_id(requested: Option<&str>) -> &str {
        match requested.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => DEFAULT_SESSION_ID,
        }
    }

    /// Context for `session_id`, created on first use
    pub fn context(&mut self, session_id: &str) -> &mut SessionContext {
        self.sessions.entry(session_id.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}
