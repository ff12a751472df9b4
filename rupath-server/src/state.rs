use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rupath_core::CampusModel;
use rupath_core::chat::SessionStore;

use crate::fallback::LlmClient;

/// Shared by every request handler
#[derive(Debug)]
pub struct AppState {
    pub model: Arc<CampusModel>,
    sessions: Mutex<SessionStore>,
    pub llm: Option<LlmClient>,
}

impl AppState {
    pub fn new(model: Arc<CampusModel>, llm: Option<LlmClient>) -> Self {
        Self {
            model,
            sessions: Mutex::new(SessionStore::new()),
            llm,
        }
    }

    /// Locks the session store, recovering from a poisoned lock
    pub fn sessions(&self) -> MutexGuard<'_, SessionStore> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
