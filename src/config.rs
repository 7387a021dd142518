//! Widget configuration
//!
//! `WidgetConfig` is the read-once option set the host page passes to `init`.
//! `TransportConfig` describes where the backend lives and is loaded from
//! environment variables with sensible defaults.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Default backend base URL (the mock backend's default bind address)
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Options recognized by `ChatWidget::init`
///
/// Deserializes from the host's JSON shape
/// (`{"sessionId": "...", "welcomeMessage": "..."}`). Missing fields default
/// and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Session identifier to reuse instead of generating one
    pub session_id: Option<String>,
    /// Bot message shown before any user interaction
    pub welcome_message: Option<String>,
}

impl WidgetConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session identifier
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the welcome message
    pub fn with_welcome_message(mut self, message: impl Into<String>) -> Self {
        self.welcome_message = Some(message.into());
        self
    }

    /// Parse host-supplied JSON permissively
    ///
    /// Each field is read on its own: a missing or wrongly typed field
    /// defaults without discarding the others. Input that is not JSON at all
    /// yields the defaults.
    pub fn from_json_lenient(raw: &str) -> Self {
        let value = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed widget configuration");
                return Self::default();
            }
        };
        let string_field = |key: &str| {
            let field = value.get(key)?;
            let text = field.as_str();
            if text.is_none() && !field.is_null() {
                tracing::debug!(field = key, "Ignoring wrongly typed widget option");
            }
            text.map(str::to_string)
        };

        Self {
            session_id: string_field("sessionId"),
            welcome_message: string_field("welcomeMessage"),
        }
    }

    /// Load from `FLYME_SESSION_ID` and `FLYME_WELCOME_MESSAGE`
    pub fn from_env() -> Self {
        Self {
            session_id: env::var("FLYME_SESSION_ID").ok().filter(|s| !s.is_empty()),
            welcome_message: env::var("FLYME_WELCOME_MESSAGE")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Base URL of the backend, without the `/v1/...` path
    pub base_url: String,
    /// Upper bound on a single exchange
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Load from `FLYME_BACKEND_URL` and `FLYME_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("FLYME_BACKEND_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            request_timeout: Duration::from_secs(
                env::var("FLYME_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        }
    }

    /// Full URL of the message endpoint
    pub fn message_url(&self) -> String {
        format!("{}/v1/chat/message", self.base_url.trim_end_matches('/'))
    }
}
