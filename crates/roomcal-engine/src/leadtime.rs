//! Booking-horizon policy — how soon and how far ahead a start may fall.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::error::{BookingError, Result};
use crate::model::RoomCalendar;

/// Check a candidate start against the calendar's lead-time bounds.
///
/// `now` is the caller's clock; it is evaluated in the calendar's zone.
/// Fails when `start < now + minLeadTimeMins` or
/// `start > now + maxLeadTimeDays`.
pub fn within_lead_times(
    calendar: &RoomCalendar,
    start: DateTime<FixedOffset>,
    now: DateTime<Utc>,
) -> Result<()> {
    let now_local = now.with_timezone(&calendar.timezone);

    let earliest = now_local + Duration::minutes(i64::from(calendar.min_lead_time_mins));
    if start < earliest {
        return Err(BookingError::InsideMinLeadTime {
            minutes: calendar.min_lead_time_mins,
        });
    }

    let latest = now_local + Duration::days(i64::from(calendar.max_lead_time_days));
    if start > latest {
        return Err(BookingError::BeyondMaxLeadTime {
            days: calendar.max_lead_time_days,
        });
    }

    Ok(())
}
