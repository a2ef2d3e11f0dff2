//! The five endpoint operations of the booking protocol
//!
//! [`BookingApi`] is the seam between flows and the transport: production
//! code uses [`Gateway`], tests substitute a mock to assert call ordering
//! and short-circuiting.

use crate::client::Gateway;
use crate::error::GatewayError;
use async_trait::async_trait;
use courtrace_core::{BookingConfirmation, BookingSubmission, SlotListing};
use tracing::debug;

/// The reservation API's five operations, in protocol order.
///
/// The remote API is stateful across the step sequence for a given
/// credential; implementations must preserve call order and never skip calls.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `GET /utility/{utility_id}/booking-time` — list the slot descriptors
    /// for a booking date.
    async fn booking_times(&self, booking_date: i64) -> Result<SlotListing, GatewayError>;

    /// `GET /utility/{utility_id}/classifies` — category listing for a slot.
    /// The body is not consumed beyond success or failure.
    async fn classifies(
        &self,
        time_constraint_id: i64,
        from_time: i64,
    ) -> Result<serde_json::Value, GatewayError>;

    /// `GET /utility/{utility_id}/places` — availability listing.
    async fn places(
        &self,
        classify_id: i64,
        time_constraint_id: i64,
        from_time: i64,
    ) -> Result<serde_json::Value, GatewayError>;

    /// `GET /utility/ticket-info` — ticket terms for a place.
    async fn ticket_info(
        &self,
        booking_date: i64,
        place_utility_id: i64,
        time_constraint_id: i64,
    ) -> Result<serde_json::Value, GatewayError>;

    /// `POST /customer-utility/booking` — the commit call. The submission
    /// must carry its checksum.
    async fn commit_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingConfirmation, GatewayError>;
}

#[async_trait]
impl BookingApi for Gateway {
    async fn booking_times(&self, booking_date: i64) -> Result<SlotListing, GatewayError> {
        let path = format!("/utility/{}/booking-time", self.utility_id());
        debug!(booking_date, "fetching booking times");

        self.send(
            self.get(&path)
                .query(&[("bookingDate", booking_date.to_string())]),
        )
        .await
    }

    async fn classifies(
        &self,
        time_constraint_id: i64,
        from_time: i64,
    ) -> Result<serde_json::Value, GatewayError> {
        let path = format!("/utility/{}/classifies", self.utility_id());
        debug!(time_constraint_id, from_time, "fetching classifies");

        self.send(self.get(&path).query(&[
            ("timeConstraintId", time_constraint_id.to_string()),
            ("monthlyTicket", "false".to_string()),
            ("fromTime", from_time.to_string()),
        ]))
        .await
    }

    async fn places(
        &self,
        classify_id: i64,
        time_constraint_id: i64,
        from_time: i64,
    ) -> Result<serde_json::Value, GatewayError> {
        let path = format!("/utility/{}/places", self.utility_id());
        debug!(classify_id, time_constraint_id, from_time, "fetching places");

        self.send(self.get(&path).query(&[
            ("classifyId", classify_id.to_string()),
            ("fromTime", from_time.to_string()),
            ("timeConstraintId", time_constraint_id.to_string()),
            ("monthlyTicket", "false".to_string()),
        ]))
        .await
    }

    async fn ticket_info(
        &self,
        booking_date: i64,
        place_utility_id: i64,
        time_constraint_id: i64,
    ) -> Result<serde_json::Value, GatewayError> {
        debug!(booking_date, place_utility_id, "fetching ticket info");

        self.send(self.get("/utility/ticket-info").query(&[
            ("bookingDate", booking_date.to_string()),
            ("placeUtilityId", place_utility_id.to_string()),
            ("timeConstraintId", time_constraint_id.to_string()),
        ]))
        .await
    }

    async fn commit_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingConfirmation, GatewayError> {
        debug!(
            place_id = submission.entry().place_id,
            "committing booking"
        );

        self.send(self.post("/customer-utility/booking").json(submission))
            .await
    }
}
