//! HTTP transport
//!
//! Posts chat messages to the backend with a shared reqwest client.

use super::types::{ChatReply, ChatRequest};
use super::ChatTransport;
use crate::config::TransportConfig;
use crate::error::TransportError;
use async_trait::async_trait;

/// reqwest-backed `ChatTransport`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with its own connection pool
    ///
    /// # Errors
    /// * Returns `TransportError::Network` if the HTTP client cannot be built
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a transport reusing an existing client
    pub fn with_client(client: reqwest::Client, config: TransportConfig) -> Self {
        Self { client, config }
    }

    /// Backend settings in use
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.config.request_timeout.as_secs())
        } else {
            TransportError::Network(error)
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: ChatRequest) -> Result<ChatReply, TransportError> {
        let url = self.config.message_url();

        tracing::debug!(
            url = %url,
            session_id = %request.session_id,
            text_len = request.text.len(),
            "Sending chat message"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let reply = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => ChatReply::from_value(&value),
            Err(e) => {
                tracing::warn!(
                    session_id = %request.session_id,
                    error = %e,
                    "Backend reply is not JSON"
                );
                ChatReply::default()
            }
        };

        tracing::debug!(
            session_id = %request.session_id,
            has_text = reply.text.is_some(),
            "Received chat reply"
        );

        Ok(reply)
    }
}
