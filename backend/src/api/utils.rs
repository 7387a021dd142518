//! API utility functions
//!
//! Validation helpers shared by handlers.

use crate::error::AppError;

/// Maximum message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Validate message text
///
/// # Returns
/// * `Ok(())` - Text is valid
/// * `Err(AppError)` - Text is empty or too long
pub fn validate_message(text: &str) -> Result<(), AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidMessage(
            "Message text cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::InvalidMessage(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}
