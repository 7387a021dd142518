// Input composer
// Holds the text being typed and decides when it becomes a submission

/// What pressing Enter does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterAction {
    /// Plain Enter sends the message
    Submit,
    /// Shift+Enter inserts a literal line break
    InsertLineBreak,
}

impl EnterAction {
    /// Map the Shift modifier state to an action
    pub fn for_shift(shift: bool) -> Self {
        if shift {
            EnterAction::InsertLineBreak
        } else {
            EnterAction::Submit
        }
    }
}

/// Text input buffer of the panel
#[derive(Debug, Clone, Default)]
pub struct Composer {
    buffer: String,
}

impl Composer {
    /// Create an empty composer
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Mutable buffer, bound to the text field
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Whether the buffer holds anything worth sending
    pub fn can_submit(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Accept the buffer as a submission
    /// Blank input is ignored and left in place; accepted input is returned
    /// trimmed and the buffer is cleared
    pub fn take_submission(&mut self) -> Option<String> {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.buffer.clear();
        Some(text)
    }

    /// Handle an Enter key press
    pub fn press_enter(&mut self, shift: bool) -> Option<String> {
        match EnterAction::for_shift(shift) {
            EnterAction::Submit => self.take_submission(),
            EnterAction::InsertLineBreak => {
                self.buffer.push('\n');
                None
            }
        }
    }
}
