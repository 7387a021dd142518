// State management module
// Shared router state and the in-memory session store

pub mod app_state;
pub mod sessions;

pub use app_state::AppState;
pub use sessions::SessionStore;
