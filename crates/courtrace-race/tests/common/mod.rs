//! Shared scripted mock of the reservation API

#![allow(dead_code)]

use async_trait::async_trait;
use courtrace_core::{BookingConfirmation, BookingSubmission, SlotListing, TimeSlot};
use courtrace_http::{BookingApi, GatewayError};
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

/// A scripted [`BookingApi`] that records every call (with its arguments) in
/// order, optionally fails at a named step, and optionally delays each call
/// to steer completion order in race tests.
pub struct MockApi {
    tag: String,
    slots: Vec<TimeSlot>,
    fail_at: Option<&'static str>,
    commit_code: i64,
    delay: Duration,
    pub calls: Mutex<Vec<String>>,
    pub submissions: Mutex<Vec<BookingSubmission>>,
}

impl MockApi {
    pub fn succeeding() -> Self {
        Self {
            tag: "mock".to_string(),
            slots: vec![
                slot(571, 123),
                slot(575, 456),
            ],
            fail_at: None,
            commit_code: 200,
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Fail at one of: `booking_times`, `classifies`, `places`,
    /// `ticket_info`, `commit`.
    pub fn failing_at(step: &'static str) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::succeeding()
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn with_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_commit_code(mut self, code: i64) -> Self {
        self.commit_code = code;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn step(&self, name: &'static str, rendered: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(rendered);
        tokio::time::sleep(self.delay).await;

        if self.fail_at == Some(name) {
            return Err(GatewayError::Status {
                status: 500,
                body: format!("{}: {} unavailable", self.tag, name),
            });
        }
        Ok(())
    }
}

pub fn slot(id: i64, from_time: i64) -> TimeSlot {
    TimeSlot {
        id,
        from_time,
        to_time: None,
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn booking_times(&self, booking_date: i64) -> Result<SlotListing, GatewayError> {
        self.step("booking_times", format!("booking_times({booking_date})"))
            .await?;
        Ok(SlotListing {
            data: self.slots.clone(),
        })
    }

    async fn classifies(
        &self,
        time_constraint_id: i64,
        from_time: i64,
    ) -> Result<serde_json::Value, GatewayError> {
        self.step(
            "classifies",
            format!("classifies({time_constraint_id},{from_time})"),
        )
        .await?;
        Ok(json!({"data": []}))
    }

    async fn places(
        &self,
        classify_id: i64,
        time_constraint_id: i64,
        from_time: i64,
    ) -> Result<serde_json::Value, GatewayError> {
        self.step(
            "places",
            format!("places({classify_id},{time_constraint_id},{from_time})"),
        )
        .await?;
        Ok(json!({"data": []}))
    }

    async fn ticket_info(
        &self,
        booking_date: i64,
        place_utility_id: i64,
        time_constraint_id: i64,
    ) -> Result<serde_json::Value, GatewayError> {
        self.step(
            "ticket_info",
            format!("ticket_info({booking_date},{place_utility_id},{time_constraint_id})"),
        )
        .await?;
        Ok(json!({"data": {}}))
    }

    async fn commit_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingConfirmation, GatewayError> {
        self.step(
            "commit",
            format!("commit({})", submission.entry().place_id),
        )
        .await?;
        self.submissions.lock().unwrap().push(submission.clone());

        if self.commit_code == 200 {
            Ok(BookingConfirmation {
                code: Some(200),
                message: Some("booked".to_string()),
                data: None,
            })
        } else {
            Ok(BookingConfirmation {
                code: Some(self.commit_code),
                message: Some(format!("{}: commit refused", self.tag)),
                data: None,
            })
        }
    }
}
