// View model
// Everything the presentation layer renders: message log, typing flag,
// panel visibility, and the input composer

pub mod composer;
pub mod conversation;

pub use composer::{Composer, EnterAction};
pub use conversation::{Author, Conversation, Message};
