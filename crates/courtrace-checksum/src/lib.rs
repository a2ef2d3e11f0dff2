//! # Courtrace Checksum
//!
//! The request-authentication digest the reservation API requires on every
//! commit call (`cs` field).
//!
//! ## Digest formula
//!
//! 1. Arithmetic sum of the four numeric payload fields:
//!    `utility_id + place_id + booking_date + time_constraint_id`
//! 2. Decimal string form of the sum, concatenated directly with the shared
//!    secret (no separator)
//! 3. SHA-256 over the UTF-8 bytes, rendered as lowercase hex
//!
//! The digest is the sole authentication proof the server checks on the
//! write call. It is computed only from the final, fully-populated payload.
//!
//! ## Example
//!
//! ```rust
//! use courtrace_checksum::sign;
//!
//! let digest = sign(75, 802, 1_700_000_000_000, 571, "S");
//! assert_eq!(digest.len(), 64);
//! ```

mod checksum;

pub use checksum::*;
