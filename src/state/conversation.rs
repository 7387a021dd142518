// Conversation view model
// Ordered message log plus the typing and visibility flags

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    /// Typed by the person using the widget
    User,
    /// Returned by the backend, or produced locally on failure
    Bot,
}

impl Author {
    /// Lowercase role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

/// A single entry of the log
/// Entries are never mutated once appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author of the entry
    pub author: Author,
    /// Text as shown, line breaks included
    pub text: String,
}

/// Declarative state of one bubble + panel pair
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    /// Append-only log in commit order
    messages: Vec<Message>,
    /// Whether a backend reply is pending
    typing: bool,
    /// Whether the panel is visible (the bubble always is)
    panel_open: bool,
    /// Set on append, taken by the renderer to scroll to the newest entry
    scroll_pending: bool,
}

impl Conversation {
    /// Create an empty conversation with the panel closed
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user entry
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Author::User, text.into());
    }

    /// Append a bot entry
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.push(Author::Bot, text.into());
    }

    fn push(&mut self, author: Author, text: String) {
        self.messages.push(Message { author, text });
        self.scroll_pending = true;
    }

    /// All entries, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent entry, if any
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the typing indicator is shown
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Show or hide the typing indicator
    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    /// Whether the panel is visible
    pub fn is_open(&self) -> bool {
        self.panel_open
    }

    /// Show or hide the panel
    /// Returns true if the visibility changed
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.panel_open != open;
        self.panel_open = open;
        changed
    }

    /// Consume the pending scroll request
    /// Returns true once per batch of appended entries
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}
