//! Courtrace domain and wire types
//!
//! Wire types mirror the reservation API's JSON shapes (camelCase fields,
//! explicit nulls where the server expects them).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Response `code` value that signals an accepted booking.
pub const SUCCESS_CODE: i64 = 200;

/// Fixed ticket policy attached to every commit: four resident tickets,
/// no child or guest tickets.
pub const RESIDENT_TICKETS: u32 = 4;

/// Device type reported in the commit payload.
pub const DEVICE_TYPE: &str = "ANDROID";

/// One bookable court/slot combination competing in the race.
///
/// Immutable once constructed; supplied by configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub place_id: i64,
    pub place_utility_id: i64,
    pub time_constraint_id: i64,
    pub label: String,
}

impl Display for Candidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (place {})", self.label, self.place_id)
    }
}

/// The ordered steps of a candidate flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    SlotDiscovery,
    CategoryListing,
    AvailabilityListing,
    TicketTerms,
    Commit,
}

impl Display for BookingStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BookingStep::SlotDiscovery => "slot discovery",
            BookingStep::CategoryListing => "category listing",
            BookingStep::AvailabilityListing => "availability listing",
            BookingStep::TicketTerms => "ticket terms",
            BookingStep::Commit => "commit",
        };
        write!(f, "{name}")
    }
}

/// One slot descriptor from the booking-time listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub id: i64,

    #[serde(rename = "fromTime")]
    pub from_time: i64,

    #[serde(rename = "toTime", skip_serializing_if = "Option::is_none")]
    pub to_time: Option<i64>,
}

/// Envelope of the booking-time discovery response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotListing {
    #[serde(default)]
    pub data: Vec<TimeSlot>,
}

impl SlotListing {
    /// Find the slot matching a time-constraint identifier.
    pub fn find(&self, time_constraint_id: i64) -> Option<&TimeSlot> {
        self.data.iter().find(|slot| slot.id == time_constraint_id)
    }
}

/// One entry of the commit payload's `bookingRequests` array.
///
/// The optional ticket fields serialize as explicit `null`s — the server
/// rejects payloads where they are absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestEntry {
    pub booking_date: i64,
    pub place_id: i64,
    pub time_constraint_id: i64,
    pub utility_id: i64,
    pub resident_ticket: Option<u32>,
    pub resident_child_ticket: Option<u32>,
    pub guest_ticket: Option<u32>,
    pub guest_child_ticket: Option<u32>,
}

/// The commit payload.
///
/// `cs` is the request-authentication digest; it is `None` until attached and
/// must be populated before the payload goes on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub booking_requests: Vec<BookingRequestEntry>,
    pub payment_method: Option<String>,
    pub vin_club_point: Option<i64>,
    pub device_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cs: Option<String>,
}

impl BookingSubmission {
    /// Build the commit payload for one candidate with the fixed ticket
    /// policy. The checksum is not yet attached.
    pub fn for_candidate(candidate: &Candidate, utility_id: i64, booking_date: i64) -> Self {
        Self {
            booking_requests: vec![BookingRequestEntry {
                booking_date,
                place_id: candidate.place_id,
                time_constraint_id: candidate.time_constraint_id,
                utility_id,
                resident_ticket: Some(RESIDENT_TICKETS),
                resident_child_ticket: None,
                guest_ticket: None,
                guest_child_ticket: None,
            }],
            payment_method: None,
            vin_club_point: None,
            device_type: DEVICE_TYPE.to_string(),
            cs: None,
        }
    }

    /// The single booking entry of this submission.
    ///
    /// The payload always carries exactly one entry; the array shape is a
    /// server-side contract.
    pub fn entry(&self) -> &BookingRequestEntry {
        &self.booking_requests[0]
    }
}

/// Commit response from the reservation API.
///
/// `code == 200` signals an accepted booking; any other value (or a missing
/// code) is a rejection, with `message` carrying the server's reason when
/// present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    pub code: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl BookingConfirmation {
    /// Whether the server accepted the booking.
    pub fn is_accepted(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }
}
