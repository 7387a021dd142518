//! Fly Me chat widget
//!
//! An embeddable chat widget: a floating bubble that opens a message panel,
//! sends what the user types to the booking backend and renders the reply.
//!
//! The core (`widget`, `state`, `transport`) is independent of any UI
//! toolkit; `ui` renders it with egui.

pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod transport;
pub mod ui;
pub mod widget;

pub use config::{TransportConfig, WidgetConfig};
pub use error::TransportError;
pub use session::SessionId;
pub use widget::{ChatWidget, SubmitOutcome};
