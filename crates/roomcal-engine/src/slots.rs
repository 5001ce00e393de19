//! Step-aligned free-slot enumeration.
//!
//! Slots are independent fixed-width windows on the rounding grid; they are
//! never merged into larger contiguous ranges — the grid UI renders them
//! one by one.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

use crate::hours::detect_ooh;
use crate::model::RoomCalendar;
use crate::query::{is_available, probe_event};
use crate::timegrid::{round_to_step, Rounding};

/// One bookable step-width window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub duration_minutes: i64,
}

/// Enumerate the free `step_mins`-wide slots inside `[range_start, range_end)`.
///
/// The cursor starts at `range_start` rounded *up* to the step grid and
/// advances one step at a time while the slot start precedes `range_end`.
/// A slot is collected when the window passes the lead-time and overlap
/// checks and does not fall outside opening hours.
pub fn list_free_slots(
    calendar: &RoomCalendar,
    range_start: DateTime<FixedOffset>,
    range_end: DateTime<FixedOffset>,
    step_mins: u32,
    now: DateTime<Utc>,
) -> Vec<FreeSlot> {
    let step = Duration::minutes(i64::from(step_mins));
    let mut slots = Vec::new();

    let mut cursor = round_to_step(range_start, step_mins, Rounding::Up);
    while cursor < range_end {
        let slot_end = cursor + step;
        let bookable = is_available(calendar, cursor, slot_end, now).available
            && !detect_ooh(calendar, &probe_event(calendar, cursor, slot_end, now));
        if bookable {
            slots.push(FreeSlot {
                start: cursor,
                end: slot_end,
                duration_minutes: i64::from(step_mins),
            });
        }
        cursor += step;
    }

    slots
}
