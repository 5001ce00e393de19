//! Buffered-interval conflict detection.
//!
//! Events are compared on their *buffered* intervals: the nominal window
//! widened by the pre/post buffers (per-event override, calendar default
//! otherwise). Overlap is strict half-open — two events that merely touch
//! (`a.end == b.start`) do not conflict.

use chrono::{DateTime, Duration, FixedOffset};

use crate::error::{BookingError, Result};
use crate::model::{RoomCalendar, RoomEvent};

/// The interval actually used for overlap testing:
/// `[start − preBuffer, end + postBuffer)`.
pub fn apply_buffers(
    event: &RoomEvent,
    calendar: &RoomCalendar,
) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let pre = event
        .pre_buffer_mins
        .unwrap_or(calendar.default_pre_buffer_mins);
    let post = event
        .post_buffer_mins
        .unwrap_or(calendar.default_post_buffer_mins);
    (
        event.starts_at - Duration::minutes(i64::from(pre)),
        event.ends_at + Duration::minutes(i64::from(post)),
    )
}

/// Strict half-open interval overlap. Touching endpoints are not an overlap.
pub fn intervals_overlap(
    a_start: DateTime<FixedOffset>,
    a_end: DateTime<FixedOffset>,
    b_start: DateTime<FixedOffset>,
    b_end: DateTime<FixedOffset>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Test a candidate event against every non-cancelled event in the calendar.
///
/// The scan runs in stored list order and reports the *first* overlapping
/// event. The candidate's own id is skipped so an in-place update can be
/// checked against its neighbours. Fails with
/// [`BookingError::InvalidRange`] when the candidate's buffered interval is
/// inverted, and [`BookingError::Conflict`] on overlap.
pub fn check_overlap(calendar: &RoomCalendar, candidate: &RoomEvent) -> Result<()> {
    let (cand_start, cand_end) = apply_buffers(candidate, calendar);
    if cand_end <= cand_start {
        return Err(BookingError::InvalidRange);
    }

    for existing in &calendar.events {
        if existing.is_cancelled() || existing.id == candidate.id {
            continue;
        }
        let (start, end) = apply_buffers(existing, calendar);
        if intervals_overlap(cand_start, cand_end, start, end) {
            return Err(BookingError::Conflict {
                kind: existing.kind,
                label: existing.label().to_string(),
                with: Box::new(existing.clone()),
            });
        }
    }

    Ok(())
}
