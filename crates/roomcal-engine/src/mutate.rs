//! Copy-on-write calendar mutations.
//!
//! Each operation validates a candidate against the calendar's rules and
//! returns a *new* calendar value on success; inputs are never mutated. The
//! caller is expected to serialize writers per room and treat the returned
//! value as the new authoritative snapshot.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::conflict::check_overlap;
use crate::error::{BookingError, Result};
use crate::leadtime::within_lead_times;
use crate::model::{RoomCalendar, RoomEvent};
use crate::timegrid::is_on_step;

/// Validate and append a new event.
///
/// Checks, in order: the event targets this room, its id is unused, both
/// boundaries sit on the rounding grid, the start respects the lead-time
/// bounds, and the buffered interval overlaps no existing non-cancelled
/// event.
pub fn add_event(
    calendar: &RoomCalendar,
    event: RoomEvent,
    now: DateTime<Utc>,
) -> Result<RoomCalendar> {
    if event.room_id != calendar.room_id {
        return Err(BookingError::RoomMismatch {
            expected: calendar.room_id.clone(),
            payload: event.room_id,
        });
    }
    if calendar.events.iter().any(|e| e.id == event.id) {
        return Err(BookingError::DuplicateId { id: event.id });
    }

    let step = calendar.rounding_step_mins.minutes();
    if !is_on_step(&event.starts_at, step) || !is_on_step(&event.ends_at, step) {
        return Err(BookingError::StepMisalignment { step });
    }
    within_lead_times(calendar, event.starts_at, now)?;
    check_overlap(calendar, &event)?;

    debug!(room = %calendar.room_id, event = %event.id, "event added");
    let mut next = calendar.clone();
    next.events.push(event);
    Ok(next)
}

/// Replace an existing event, matched by id, preserving its list position.
///
/// Only the overlap check runs here: rounding-grid and lead-time rules are
/// not re-validated on update, so an admin can reshape historic or off-grid
/// events that a fresh add would reject.
pub fn update_event(calendar: &RoomCalendar, event: RoomEvent) -> Result<RoomCalendar> {
    let Some(pos) = calendar.events.iter().position(|e| e.id == event.id) else {
        return Err(BookingError::NotFound { id: event.id });
    };
    if event.room_id != calendar.room_id {
        return Err(BookingError::RoomMismatch {
            expected: calendar.room_id.clone(),
            payload: event.room_id,
        });
    }
    check_overlap(calendar, &event)?;

    debug!(room = %calendar.room_id, event = %event.id, "event updated");
    let mut next = calendar.clone();
    next.events[pos] = event;
    Ok(next)
}

/// Hard-remove the event with the given id. Distinct from cancellation:
/// the event leaves the list entirely. An absent id is a no-op, never an
/// error.
pub fn delete_event(calendar: &RoomCalendar, id: &str) -> RoomCalendar {
    let mut next = calendar.clone();
    next.events.retain(|e| e.id != id);
    next
}
