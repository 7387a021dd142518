//! Transport module
//!
//! One outbound request per user message. The widget talks to the backend
//! through the `ChatTransport` trait so the exchange logic can run against the
//! real HTTP client or a scripted stand-in.

pub mod client;
pub mod types;

use crate::error::TransportError;
use async_trait::async_trait;

pub use client::HttpTransport;
pub use types::{ChatReply, ChatRequest};

/// A backend that answers chat messages
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one message and wait for the single reply
    async fn send(&self, request: ChatRequest) -> Result<ChatReply, TransportError>;
}
