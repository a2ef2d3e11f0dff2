//! # Courtrace HTTP
//!
//! HTTP gateway for the reservation API.
//!
//! This crate provides:
//! - [`Gateway`]: a reqwest-based client applying the fixed header set and a
//!   bounded request timeout to every call, with uniform error capture
//! - [`BookingApi`]: the async trait exposing the five endpoint operations,
//!   the seam flows use so tests can run against a mock
//!
//! Each concurrent flow owns its own `Gateway` — the remote API keys session
//! state to the credential and the step sequence, so gateways are never
//! shared across flows.
//!
//! ## Example
//!
//! ```ignore
//! use courtrace_http::{BookingApi, Gateway};
//!
//! let gateway = Gateway::new(&config.base_url, config.utility_id, &token, &config.device);
//! let listing = gateway.booking_times(booking_date).await?;
//! ```

mod api;
mod client;
mod error;

pub use api::BookingApi;
pub use client::Gateway;
pub use error::GatewayError;
