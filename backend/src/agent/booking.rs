//! Booking agent
//!
//! Per-session slot-filling dialogue: collect the five booking slots, read a
//! summary back, and wait for the user to confirm it.

use super::extractor::{Extraction, SlotExtractor};
use super::slots::Slots;
use tracing::{debug, warn};

/// Greeting that doubles as the first question asked
pub const GREETING: &str =
    "Hi! I'm the Fly Me assistant. Tell me your departure city, destination, dates, and max budget.";

/// Reply once the user confirmed the summary
pub const CONFIRMED_MESSAGE: &str =
    "✅ Booking details confirmed. Your request is being processed.";

/// Reply after too many unconfirmed answers
pub const CONFIRMATION_FAILED_MESSAGE: &str = "⚠️ We couldn't get your confirmation.\nIf you want to modify anything, please tell me what to change.";

/// Unconfirmed answers tolerated before giving up on confirmation
pub const MAX_CONFIRMATION_ATTEMPTS: u32 = 3;

/// Dialogue phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Still asking for slots
    Collecting,
    /// Summary shown, waiting for a yes
    WaitingConfirmation,
    /// User confirmed the summary
    Confirmed,
}

/// What the agent answers to one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    /// Text shown to the user
    pub text: String,
    /// Slots known after this message
    pub slots: Slots,
    /// Keys of the slots still missing
    pub missing_info: Vec<String>,
    /// Whether the booking is confirmed
    pub complete: bool,
    /// Set when this message confirmed the booking
    pub confirmed: bool,
    /// Set when confirmation was abandoned
    pub confirmation_failed: bool,
}

/// Slot-filling state of one session
#[derive(Debug, Clone)]
pub struct BookingAgent {
    slots: Slots,
    status: BookingStatus,
    last_question: String,
    awaiting_confirmation: bool,
    confirmation_attempts: u32,
}

impl Default for BookingAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingAgent {
    /// Create an agent that has just greeted the user
    pub fn new() -> Self {
        Self {
            slots: Slots::default(),
            status: BookingStatus::Collecting,
            last_question: GREETING.to_string(),
            awaiting_confirmation: false,
            confirmation_attempts: 0,
        }
    }

    /// Collected slots
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Current phase
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Last question put to the user
    pub fn last_question(&self) -> &str {
        &self.last_question
    }

    /// Handle one user message
    pub async fn process_message(
        &mut self,
        extractor: &dyn SlotExtractor,
        user_message: &str,
    ) -> AgentReply {
        debug!(
            slots = ?self.slots,
            status = ?self.status,
            awaiting_confirmation = self.awaiting_confirmation,
            confirmation_attempts = self.confirmation_attempts,
            "Processing message"
        );

        if self.awaiting_confirmation {
            return self.handle_confirmation(extractor, user_message).await;
        }

        let extraction = match extractor
            .extract(&self.slots, &self.last_question, user_message)
            .await
        {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(error = %e, "Slot extraction failed, using fallback");
                Extraction::fallback(&self.slots)
            }
        };
        self.slots.merge(&extraction.updated_slots);

        let missing = self.slots.missing();
        let Some(next) = missing.first().copied() else {
            self.awaiting_confirmation = true;
            self.confirmation_attempts = 1;
            self.status = BookingStatus::WaitingConfirmation;
            let summary = self.confirmation_message();
            self.last_question = summary.clone();
            return self.reply(summary, false);
        };

        self.last_question = next.question().to_string();
        self.reply(next.question().to_string(), false)
    }

    async fn handle_confirmation(
        &mut self,
        extractor: &dyn SlotExtractor,
        user_message: &str,
    ) -> AgentReply {
        let confirmed = extractor
            .detect_confirmation(&self.last_question, user_message)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Confirmation detection failed");
                false
            });

        if confirmed {
            self.awaiting_confirmation = false;
            self.status = BookingStatus::Confirmed;
            let mut reply = self.reply(CONFIRMED_MESSAGE.to_string(), true);
            reply.confirmed = true;
            return reply;
        }

        self.confirmation_attempts += 1;
        if self.confirmation_attempts >= MAX_CONFIRMATION_ATTEMPTS {
            self.awaiting_confirmation = false;
            let mut reply = self.reply(CONFIRMATION_FAILED_MESSAGE.to_string(), false);
            reply.confirmation_failed = true;
            return reply;
        }

        self.reply(self.confirmation_message(), false)
    }

    fn reply(&self, text: String, complete: bool) -> AgentReply {
        AgentReply {
            text,
            slots: self.slots.clone(),
            missing_info: self
                .slots
                .missing()
                .into_iter()
                .map(|n| n.key().to_string())
                .collect(),
            complete,
            confirmed: false,
            confirmation_failed: false,
        }
    }

    /// Summary of the collected slots, asking for confirmation
    pub fn confirmation_message(&self) -> String {
        let value = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        format!(
            "Thank you! Here are your flight details:\n\n\
             ✈️ From: {}\n\
             ✈️ To: {}\n\
             📅 Departure: {}\n\
             📅 Return: {}\n\
             💰 Budget: {}\n\n\
             Please confirm if everything is correct by replying 'yes' or 'confirm'.",
            value(&self.slots.or_city),
            value(&self.slots.dst_city),
            value(&self.slots.dep_date),
            value(&self.slots.ret_date),
            value(&self.slots.budget),
        )
    }
}
