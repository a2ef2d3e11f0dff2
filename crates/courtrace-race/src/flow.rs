//! The per-candidate booking flow
//!
//! Strictly ordered steps, no skipping, no going back: slot discovery →
//! category listing → availability listing → ticket terms → commit. The
//! first failing step aborts the rest and the failure is tagged with the
//! step it happened at. All per-flow state lives in an explicit
//! `BookingContext` threaded through the steps, so a commit without a
//! completed discovery is unrepresentable.

use crate::outcome::{FlowError, FlowFailure, FlowResult};
use chrono::{DateTime, Utc};
use courtrace_core::{time, BookingStep, BookingSubmission, Candidate, RaceConfig};
use courtrace_http::BookingApi;
use tracing::{debug, info, warn};

/// Static parameters shared by every flow in one race.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub utility_id: i64,
    pub classify_id: i64,
    pub target_hour: Option<u32>,
    pub days_ahead: u32,
    /// Shared secret mixed into the commit checksum.
    pub secret: String,
}

impl FlowSettings {
    pub fn from_config(config: &RaceConfig, secret: impl Into<String>) -> Self {
        Self {
            utility_id: config.utility_id,
            classify_id: config.classify_id,
            target_hour: config.target_hour,
            days_ahead: config.days_ahead,
            secret: secret.into(),
        }
    }
}

/// Per-flow state, built up as the steps complete. Owned by exactly one
/// flow; discarded when the flow ends.
struct BookingContext {
    booking_date: i64,
    from_time: i64,
}

/// Drive one candidate through the full step sequence.
///
/// Never raises past this boundary: every step error is converted into the
/// returned [`FlowResult`].
pub async fn run_flow<A: BookingApi>(
    api: &A,
    settings: &FlowSettings,
    candidate: &Candidate,
    now: DateTime<Utc>,
) -> FlowResult {
    let outcome = drive(api, settings, candidate, now).await;

    match &outcome {
        Ok(_) => info!(candidate = %candidate.label, "booking committed"),
        Err(failure) => info!(candidate = %candidate.label, %failure, "flow failed"),
    }

    FlowResult {
        candidate: candidate.clone(),
        outcome,
    }
}

async fn drive<A: BookingApi>(
    api: &A,
    settings: &FlowSettings,
    candidate: &Candidate,
    now: DateTime<Utc>,
) -> Result<courtrace_core::BookingConfirmation, FlowFailure> {
    let booking_date = time::booking_date(now);

    // Step 1: discover the slot and extract its start time.
    let listing = api
        .booking_times(booking_date)
        .await
        .map_err(|e| FlowFailure::new(BookingStep::SlotDiscovery, e))?;

    let slot = listing.find(candidate.time_constraint_id).ok_or_else(|| {
        FlowFailure::new(
            BookingStep::SlotDiscovery,
            FlowError::SlotNotFound {
                time_constraint_id: candidate.time_constraint_id,
            },
        )
    })?;

    let context = BookingContext {
        booking_date,
        from_time: slot.from_time,
    };
    debug!(from_time = context.from_time, "slot discovered");

    // Discovery is authoritative; the configured hour only cross-checks it.
    if let Some(hour) = settings.target_hour {
        if let Some(expected) = time::slot_start(now, hour, settings.days_ahead) {
            if expected != context.from_time {
                warn!(
                    expected,
                    discovered = context.from_time,
                    "discovered slot start disagrees with configured hour"
                );
            }
        }
    }

    // Step 2: category listing.
    api.classifies(candidate.time_constraint_id, context.from_time)
        .await
        .map_err(|e| FlowFailure::new(BookingStep::CategoryListing, e))?;

    // Step 3: availability listing.
    api.places(
        settings.classify_id,
        candidate.time_constraint_id,
        context.from_time,
    )
    .await
    .map_err(|e| FlowFailure::new(BookingStep::AvailabilityListing, e))?;

    // Step 4: ticket terms.
    api.ticket_info(
        context.booking_date,
        candidate.place_utility_id,
        candidate.time_constraint_id,
    )
    .await
    .map_err(|e| FlowFailure::new(BookingStep::TicketTerms, e))?;

    // Step 5: build the final payload, attach its checksum, commit.
    let mut submission =
        BookingSubmission::for_candidate(candidate, settings.utility_id, context.booking_date);
    courtrace_checksum::attach(&mut submission, &settings.secret);

    let confirmation = api
        .commit_booking(&submission)
        .await
        .map_err(|e| FlowFailure::new(BookingStep::Commit, e))?;

    if confirmation.is_accepted() {
        Ok(confirmation)
    } else {
        let message = confirmation
            .message
            .clone()
            .unwrap_or_else(|| serde_json::to_string(&confirmation).unwrap_or_default());
        Err(FlowFailure::new(
            BookingStep::Commit,
            FlowError::CommitRejected {
                code: confirmation.code,
                message,
            },
        ))
    }
}
