//! HTTP error types for the gateway

use thiserror::Error;

/// Uniform error capture for one HTTP call.
///
/// Every call produces exactly one outcome: a decoded body or one of these.
/// Nothing crosses the gateway boundary as a panic.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure or request timeout.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status. The raw body is preserved
    /// for diagnostics.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered 2xx but the body did not decode.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl GatewayError {
    /// Whether this error was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Transport(e) if e.is_timeout())
    }
}
