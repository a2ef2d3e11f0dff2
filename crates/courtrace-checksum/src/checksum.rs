//! SHA-256 commit digest

use courtrace_core::BookingSubmission;
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Compute the commit digest from the four numeric payload fields and the
/// shared secret.
///
/// Pure and deterministic: identical inputs always yield an identical digest.
///
/// # Example
///
/// ```rust
/// use courtrace_checksum::sign;
///
/// let digest = sign(75, 802, 1_700_000_000_000, 571, "S");
/// assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn sign(
    utility_id: i64,
    place_id: i64,
    booking_date: i64,
    time_constraint_id: i64,
    secret: &str,
) -> String {
    let sum = utility_id + place_id + booking_date + time_constraint_id;

    let mut hasher = Sha256::new();
    hasher.update(sum.to_string().as_bytes());
    hasher.update(secret.as_bytes());

    hex_encode(&hasher.finalize())
}

/// Compute the digest from a submission's booking entry and store it in the
/// `cs` field.
///
/// This is the only sanctioned way to populate `cs`: it reads the final,
/// fully-populated entry, never partial or earlier-step data.
pub fn attach(submission: &mut BookingSubmission, secret: &str) {
    let entry = submission.entry();
    submission.cs = Some(sign(
        entry.utility_id,
        entry.place_id,
        entry.booking_date,
        entry.time_constraint_id,
        secret,
    ));
}

/// Validate a digest string: 64 lowercase hex characters.
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == 64
        && digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Convert bytes to lowercase hex string
fn hex_encode(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(hex, "{:02x}", byte).unwrap();
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_digest_shape() {
        let digest = sign(75, 801, 1_755_792_000_000, 575, "shuttle");

        assert_eq!(digest.len(), 64);
        assert_eq!(digest, digest.to_lowercase());
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_determinism() {
        let a = sign(75, 802, 1_700_000_000_000, 571, "secret");
        let b = sign(75, 802, 1_700_000_000_000, 571, "secret");

        assert_eq!(a, b);
    }

    #[test]
    fn test_each_field_changes_digest() {
        let base = sign(75, 802, 1_700_000_000_000, 571, "secret");

        assert_ne!(sign(76, 802, 1_700_000_000_000, 571, "secret"), base);
        assert_ne!(sign(75, 803, 1_700_000_000_000, 571, "secret"), base);
        assert_ne!(sign(75, 802, 1_700_000_000_001, 571, "secret"), base);
        assert_ne!(sign(75, 802, 1_700_000_000_000, 572, "secret"), base);
        assert_ne!(sign(75, 802, 1_700_000_000_000, 571, "Secret"), base);
    }

    #[test]
    fn test_sum_not_concatenation() {
        // The fields are summed, so tuples with equal sums collide by
        // construction. Moving one unit between fields must not change it.
        let a = sign(75, 802, 1_700_000_000_000, 571, "secret");
        let b = sign(76, 801, 1_700_000_000_000, 571, "secret");

        assert_eq!(a, b);
    }

    #[test]
    fn test_is_valid_digest() {
        assert!(is_valid_digest(&"a".repeat(64)));
        assert!(is_valid_digest(&"0123456789abcdef".repeat(4)));

        assert!(!is_valid_digest("too short"));
        assert!(!is_valid_digest(&"A".repeat(64))); // uppercase is invalid
        assert!(!is_valid_digest(&"g".repeat(64)));
        assert!(!is_valid_digest(&"a".repeat(65)));
    }
}
