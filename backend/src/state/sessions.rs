// Session store
// In-memory map from session id to booking agent; lost on restart

use crate::agent::BookingAgent;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Agent of one session, locked while a message is processed
pub type SharedAgent = Arc<Mutex<BookingAgent>>;

/// Sessions keyed by the widget's session id
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SharedAgent>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the agent of a session, creating it on first use
    pub async fn get_or_create(&self, session_id: &str) -> SharedAgent {
        {
            let sessions = self.sessions.read().await;
            if let Some(agent) = sessions.get(session_id) {
                return agent.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have created it between the two locks
        if let Some(agent) = sessions.get(session_id) {
            return agent.clone();
        }
        let agent = Arc::new(Mutex::new(BookingAgent::new()));
        sessions.insert(session_id.to_string(), agent.clone());

        info!(
            event_type = "session_created",
            session_id = %session_id,
            active_sessions = sessions.len(),
            "Session created"
        );
        agent
    }

    /// Number of sessions seen since startup
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no session exists yet
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
