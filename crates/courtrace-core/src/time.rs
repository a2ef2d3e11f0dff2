//! Booking-date and slot-start derivation
//!
//! The reservation API expresses all instants as epoch milliseconds and keys
//! its calendar on the facility's fixed UTC+7 offset. All arithmetic here is
//! calendar arithmetic in that offset: "tomorrow" means the next local
//! calendar day, and a slot hour is a local wall-clock hour. Local hours
//! below 7 land on the previous UTC calendar day without shifting the local
//! date.

use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Fixed offset of the facility's time zone, in hours east of UTC.
pub const LOCAL_UTC_OFFSET_HOURS: i32 = 7;

/// The facility's fixed time zone.
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(LOCAL_UTC_OFFSET_HOURS * 3600).unwrap()
}

/// Epoch milliseconds of "tomorrow" relative to `now`: the next local
/// calendar day at the same wall-clock time.
pub fn booking_date(now: DateTime<Utc>) -> i64 {
    let local = now.with_timezone(&local_offset());
    (local + Duration::days(1)).timestamp_millis()
}

/// Epoch milliseconds of `hour`:00:00.000 local time on the day `days_ahead`
/// local calendar days after `now`.
///
/// Returns `None` if `hour` is not a valid hour of day.
pub fn slot_start(now: DateTime<Utc>, hour: u32, days_ahead: u32) -> Option<i64> {
    let offset = local_offset();
    let local_date = now.with_timezone(&offset).date_naive() + Duration::days(days_ahead as i64);
    let naive = local_date.and_hms_opt(hour, 0, 0)?;
    let local = naive.and_local_timezone(offset).single()?;
    Some(local.timestamp_millis())
}
