//! Booking assistant
//!
//! Slot definitions, the per-session dialogue state machine, and the LLM
//! extractor it relies on.

pub mod booking;
pub mod extractor;
pub mod ollama;
pub mod slots;

pub use booking::{AgentReply, BookingAgent, BookingStatus};
pub use extractor::{Extraction, ExtractorError, SlotExtractor};
pub use ollama::OllamaExtractor;
pub use slots::{SlotName, Slots};
