//! Stable element identifiers
//!
//! These names are the integration surface for host styling and automation.
//! They are used as egui `Id` sources and must not change.

use crate::state::Author;

/// Launcher bubble
pub const BUBBLE: &str = "flyme-chat-bubble";
/// Panel container
pub const PANEL: &str = "flyme-chat-panel";
/// Scrollable message container
pub const MESSAGES: &str = "flyme-chat-messages";
/// Role class of user entries
pub const MESSAGE_USER: &str = "flyme-msg-user";
/// Role class of bot entries
pub const MESSAGE_BOT: &str = "flyme-msg-bot";
/// Typing indicator
pub const TYPING: &str = "flyme-chat-typing";
/// Text input
pub const INPUT: &str = "flyme-chat-input";
/// Send control
pub const SEND: &str = "flyme-chat-send";
/// Close control
pub const CLOSE: &str = "flyme-chat-close";

/// Role class for a message author
pub fn role_class(author: Author) -> &'static str {
    match author {
        Author::User => MESSAGE_USER,
        Author::Bot => MESSAGE_BOT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_classes() {
        assert_eq!(role_class(Author::User), "flyme-msg-user");
        assert_eq!(role_class(Author::Bot), "flyme-msg-bot");
    }
}
