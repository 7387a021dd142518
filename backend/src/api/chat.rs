//! Chat API endpoint
//!
//! Receives one widget message, runs it through the session's booking agent
//! and returns the agent's reply.

use crate::agent::Slots;
use crate::api::utils::validate_message;
use crate::error::AppError;
use crate::redact::preview;
use crate::state::AppState;
use anyhow::anyhow;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Characters of user text kept in log previews
const PREVIEW_CHARS: usize = 100;
/// Characters kept in fallback warnings
const FALLBACK_PREVIEW_CHARS: usize = 300;

/// Request body sent by the widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    /// Widget session id
    pub session_id: String,
    /// User text
    pub text: String,
}

/// Reply to the widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    /// Echo of the request's session id
    pub session_id: String,
    /// Unique id of this reply
    pub reply_id: String,
    /// Text to display
    pub text: String,
    /// Slots known so far
    pub slots: Slots,
    /// Keys of the slots still missing
    pub missing_info: Vec<String>,
    /// Whether the booking is confirmed
    pub complete: bool,
    /// Booking reference (not issued by this backend)
    pub booking_id: Option<String>,
}

/// Whether a reply should be flagged as a fallback in the logs
pub fn is_fallback(text: &str, complete: bool) -> bool {
    let lower = text.to_lowercase();
    lower.contains("sorry") || lower.contains("don't understand") || !complete
}

/// POST /v1/chat/message
pub async fn chat_message(
    State(state): State<AppState>,
    Json(msg): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, AppError> {
    info!(
        event_type = "user_message",
        session_id = %msg.session_id,
        message_length = msg.text.len(),
        message_preview = %preview(&msg.text, PREVIEW_CHARS),
        "User message received"
    );
    validate_message(&msg.text)?;

    let agent = state.sessions.get_or_create(&msg.session_id).await;
    let extractor = state.extractor.clone();
    let text = msg.text.clone();

    // Run on its own task so a panic in the agent becomes a 500, not a dropped connection
    let reply = tokio::spawn(async move {
        let mut agent = agent.lock().await;
        agent.process_message(extractor.as_ref(), &text).await
    })
    .await
    .map_err(|e| {
        error!(
            event_type = "processing_error",
            session_id = %msg.session_id,
            error = %e,
            "Chat processing error"
        );
        AppError::Internal(anyhow!("Message processing failed: {}", e))
    })?;

    let fallback = is_fallback(&reply.text, reply.complete);
    info!(
        event_type = "bot_response",
        session_id = %msg.session_id,
        is_fallback = fallback,
        is_complete = reply.complete,
        missing_info_count = reply.missing_info.len(),
        response_length = reply.text.len(),
        booking_created = false,
        "Bot response generated"
    );
    if fallback {
        warn!(
            event_type = "fallback",
            session_id = %msg.session_id,
            user_input = %preview(&msg.text, FALLBACK_PREVIEW_CHARS),
            bot_response = %preview(&reply.text, FALLBACK_PREVIEW_CHARS),
            "Fallback triggered"
        );
    }

    Ok(Json(ChatMessageResponse {
        session_id: msg.session_id,
        reply_id: Uuid::new_v4().to_string(),
        text: reply.text,
        slots: reply.slots,
        missing_info: reply.missing_info,
        complete: reply.complete,
        booking_id: None,
    }))
}
