//! Transport error types
//!
//! Every failure of a chat exchange is recovered locally: the widget logs the
//! error and shows a fixed bot message. These types exist for diagnostics.

use thiserror::Error;

/// Errors that can occur while exchanging a message with the backend
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request could not be sent or the connection failed mid-way
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for the logs
        body: String,
    },

    /// Exchange exceeded the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Exchange task ended before producing a result
    #[error("Exchange ended without a result")]
    Interrupted,
}
