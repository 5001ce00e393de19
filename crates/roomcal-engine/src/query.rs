//! Availability queries — single-window checks and multi-room search.
//!
//! [`is_available`] answers "can this exact window be booked on this room?"
//! by probing with a transient provisional event. [`search_availability`]
//! runs that probe across a fleet of rooms, collects the free ones, offers
//! day-shifted alternatives for the busy ones, and emits the two pricing
//! signals (out-of-hours flag, billable-hour count) for every room — the
//! pricing computation itself lives outside this engine.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::check_overlap;
use crate::error::BookingError;
use crate::hours::detect_ooh;
use crate::leadtime::within_lead_times;
use crate::model::{EventKind, EventStatus, RoomCalendar, RoomEvent};

/// Synthetic id carried by probe events. A calendar event reusing this id
/// would be skipped by the overlap scan, so real ids must not collide with
/// it.
const PROBE_ID: &str = "availability-probe";

/// Build the transient event used to test a window without mutating the
/// calendar.
pub(crate) fn probe_event(
    calendar: &RoomCalendar,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    now: DateTime<Utc>,
) -> RoomEvent {
    RoomEvent {
        id: PROBE_ID.to_string(),
        room_id: calendar.room_id.clone(),
        kind: EventKind::Booking,
        status: EventStatus::Provisional,
        starts_at: start,
        ends_at: end,
        title: None,
        notes: None,
        created_by: "engine".to_string(),
        created_at: now.fixed_offset(),
        recurrence: None,
        pre_buffer_mins: None,
        post_buffer_mins: None,
    }
}

/// Outcome of a single-window availability check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    /// Human-readable rejection reason, absent when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The first conflicting event, when the rejection was a conflict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_with: Option<RoomEvent>,
}

/// Check whether `[start, end)` can be booked on the calendar right now.
///
/// Runs the lead-time check first, then the buffered overlap scan; the
/// first failure becomes the reason string.
pub fn is_available(
    calendar: &RoomCalendar,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    now: DateTime<Utc>,
) -> Availability {
    let probe = probe_event(calendar, start, end, now);
    let outcome =
        within_lead_times(calendar, start, now).and_then(|()| check_overlap(calendar, &probe));

    match outcome {
        Ok(()) => Availability {
            available: true,
            reason: None,
            conflict_with: None,
        },
        Err(err) => {
            let conflict_with = match &err {
                BookingError::Conflict { with, .. } => Some((**with).clone()),
                _ => None,
            };
            Availability {
                available: false,
                reason: Some(err.to_string()),
                conflict_with,
            }
        }
    }
}

/// A multi-room availability request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    /// Restrict the search to these rooms; `None` searches every calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_ids: Option<Vec<String>>,
    /// How many days to look around the requested window for alternatives.
    #[serde(default = "default_suggest_days")]
    pub suggest_days: u32,
}

fn default_suggest_days() -> u32 {
    2
}

/// An alternative window with the same duration as the request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Day-shifted alternatives for one room that was busy at the requested
/// window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSuggestions {
    pub room_id: String,
    pub alternative: Vec<Alternative>,
}

/// Pricing signals for one room, emitted regardless of availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingFlag {
    pub room_id: String,
    /// The requested window falls (partly) outside opening hours.
    pub ooh: bool,
    /// Requested duration rounded up to whole hours.
    pub billable_hours: i64,
}

/// Result of a multi-room availability search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySearch {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    pub free_rooms: Vec<String>,
    /// Omitted from JSON entirely when no room produced an alternative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<RoomSuggestions>>,
    pub pricing_flags: Vec<PricingFlag>,
}

/// Search a set of room calendars for the requested window.
///
/// For each requested room: available rooms land in `free_rooms`; busy
/// rooms are probed at the identical-duration window shifted −d and +d
/// days for `d` in `1..=suggest_days`, and every available shift becomes an
/// alternative (at most `2 × suggest_days` per room). Every requested room
/// receives a pricing flag for the exact requested window.
pub fn search_availability(
    calendars: &[RoomCalendar],
    query: &AvailabilityQuery,
    now: DateTime<Utc>,
) -> AvailabilitySearch {
    let mut free_rooms = Vec::new();
    let mut suggestions = Vec::new();
    let mut pricing_flags = Vec::new();

    for calendar in calendars {
        if let Some(ids) = &query.room_ids {
            if !ids.iter().any(|id| id == &calendar.room_id) {
                continue;
            }
        }

        let result = is_available(calendar, query.from, query.to, now);
        if result.available {
            free_rooms.push(calendar.room_id.clone());
        } else {
            let mut alternative = Vec::new();
            for d in 1..=i64::from(query.suggest_days) {
                for shift in [-d, d] {
                    let start = query.from + Duration::days(shift);
                    let end = query.to + Duration::days(shift);
                    if is_available(calendar, start, end, now).available {
                        alternative.push(Alternative { start, end });
                    }
                }
            }
            if !alternative.is_empty() {
                suggestions.push(RoomSuggestions {
                    room_id: calendar.room_id.clone(),
                    alternative,
                });
            }
        }

        let probe = probe_event(calendar, query.from, query.to, now);
        pricing_flags.push(PricingFlag {
            room_id: calendar.room_id.clone(),
            ooh: detect_ooh(calendar, &probe),
            billable_hours: billable_hours(query.from, query.to),
        });
    }

    debug!(
        free = free_rooms.len(),
        with_alternatives = suggestions.len(),
        "availability search done"
    );

    AvailabilitySearch {
        from: query.from,
        to: query.to,
        free_rooms,
        suggestions: (!suggestions.is_empty()).then_some(suggestions),
        pricing_flags,
    }
}

/// Requested duration rounded up to whole hours; degenerate windows bill
/// zero.
fn billable_hours(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> i64 {
    let mins = (to - from).num_minutes().max(0);
    (mins + 59) / 60
}
