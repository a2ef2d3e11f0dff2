//! # Courtrace Core
//!
//! Core types, configuration, and time arithmetic for the courtrace booking
//! client.
//!
//! This crate provides:
//! - Domain types (candidates, booking steps) and the wire types exchanged
//!   with the reservation API
//! - Configuration loading and validation, with credentials sourced from the
//!   environment
//! - Booking-date and slot-start derivation in the facility's fixed time zone
//!
//! ## Example
//!
//! ```rust,ignore
//! use courtrace_core::{RaceConfig, Credentials};
//!
//! let config = RaceConfig::load("courtrace.json")?;
//! let credentials = Credentials::from_env()?;
//! ```

pub mod config;
pub mod error;
pub mod time;
pub mod types;

// Re-exports for convenience
pub use config::*;
pub use error::*;
pub use types::*;
