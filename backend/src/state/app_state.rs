// Application state
// Shared by every request handler

use super::sessions::SessionStore;
use crate::agent::SlotExtractor;
use std::sync::Arc;

/// State handed to the router
#[derive(Clone)]
pub struct AppState {
    /// One booking agent per session id
    pub sessions: SessionStore,
    /// Language understanding shared by all agents
    pub extractor: Arc<dyn SlotExtractor>,
}

impl AppState {
    /// Create state with an empty session store
    pub fn new(extractor: Arc<dyn SlotExtractor>) -> Self {
        Self {
            sessions: SessionStore::new(),
            extractor,
        }
    }
}
