//! Room calendars and events — the values every engine operation works on.
//!
//! A [`RoomCalendar`] is one room's schedule plus its policy configuration
//! (buffers, rounding grid, lead times, weekly opening hours). Calendars and
//! events serialize to the camelCase JSON shape used by the booking front
//! ends; [`import_calendar`] is the validating entry point for payloads that
//! target an existing room.
//!
//! Timestamps carry their original UTC offset (`DateTime<FixedOffset>`);
//! all local-time reasoning (opening hours, day boundaries) happens in the
//! calendar's IANA zone. A payload with an unknown zone name, a malformed
//! timestamp, or an unsupported rounding step fails at deserialization
//! rather than inside the availability logic.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BookingError, Result};

/// What an event occupies the room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Booking,
    Hold,
    Blackout,
    Maintenance,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            EventKind::Booking => "BOOKING",
            EventKind::Hold => "HOLD",
            EventKind::Blackout => "BLACKOUT",
            EventKind::Maintenance => "MAINTENANCE",
        };
        f.write_str(token)
    }
}

/// Lifecycle status. Cancelled events stay in the list (soft delete) but are
/// invisible to conflict checks and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Provisional,
    Confirmed,
    Cancelled,
}

/// Weekday token as used in opening-hours maps and recurrence descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// A local wall-clock time, stored as minutes since midnight.
///
/// Wire form is `"HH:mm"` (24-hour). `"24:00"` is accepted so an opening
/// range can run to end of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Minutes since local midnight (0..=1440).
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = || -> Option<u16> {
            let (h, m) = s.split_once(':')?;
            if h.len() != 2 || m.len() != 2 {
                return None;
            }
            let h: u16 = h.parse().ok()?;
            let m: u16 = m.parse().ok()?;
            let valid = (h < 24 && m < 60) || (h == 24 && m == 0);
            valid.then_some(h * 60 + m)
        };
        parse()
            .map(TimeOfDay)
            .ok_or_else(|| format!("expected HH:mm time of day, got {s:?}"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One open `{start, end}` range within a day's opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Weekly opening hours: weekday → ordered open ranges. A missing weekday
/// key means the room is closed that day.
pub type OpeningHours = BTreeMap<Weekday, Vec<HoursRange>>;

/// Weekly recurrence descriptor. Carried through storage and export
/// untouched — no engine operation expands it into occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRecurrence {
    pub weekdays: Vec<Weekday>,
    pub until: NaiveDate,
}

/// Booking-boundary granularity in minutes. Only the steps the grid UI can
/// render are representable; anything else is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RoundingStep {
    M5,
    M10,
    M15,
    M20,
    M30,
    M60,
}

impl RoundingStep {
    pub fn minutes(self) -> u32 {
        match self {
            RoundingStep::M5 => 5,
            RoundingStep::M10 => 10,
            RoundingStep::M15 => 15,
            RoundingStep::M20 => 20,
            RoundingStep::M30 => 30,
            RoundingStep::M60 => 60,
        }
    }
}

impl TryFrom<u32> for RoundingStep {
    type Error = String;

    fn try_from(minutes: u32) -> std::result::Result<Self, Self::Error> {
        match minutes {
            5 => Ok(RoundingStep::M5),
            10 => Ok(RoundingStep::M10),
            15 => Ok(RoundingStep::M15),
            20 => Ok(RoundingStep::M20),
            30 => Ok(RoundingStep::M30),
            60 => Ok(RoundingStep::M60),
            other => Err(format!(
                "rounding step must be one of 5, 10, 15, 20, 30, 60 minutes, got {other}"
            )),
        }
    }
}

impl From<RoundingStep> for u32 {
    fn from(step: RoundingStep) -> u32 {
        step.minutes()
    }
}

/// One scheduled occupation of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomEvent {
    /// Unique within the owning calendar.
    pub id: String,
    /// Must equal the containing calendar's `roomId`.
    pub room_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub status: EventStatus,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<WeeklyRecurrence>,
    /// Per-event buffer overrides; calendar defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_buffer_mins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_buffer_mins: Option<u32>,
}

impl RoomEvent {
    /// Title when present, id otherwise. Used in conflict reasons and exports.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }
}

/// One room's schedule and policy configuration.
///
/// Calendars are immutable values: every mutation in [`crate::mutate`]
/// returns a new calendar, and the returned value is the new authoritative
/// snapshot. Event insertion order is preserved — conflict checks scan in
/// list order and report the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCalendar {
    /// Unique across the system.
    pub room_id: String,
    /// IANA zone; all local-time computation happens here.
    pub timezone: Tz,
    pub default_pre_buffer_mins: u32,
    pub default_post_buffer_mins: u32,
    pub rounding_step_mins: RoundingStep,
    pub min_lead_time_mins: u32,
    pub max_lead_time_days: u32,
    /// Pricing-boundary hints, carried through unchanged for the pricing
    /// layer outside this engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_day_cutoff_hour: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_cutoff_hour: Option<u8>,
    /// `None` means always open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub events: Vec<RoomEvent>,
}

impl RoomCalendar {
    /// Parse a calendar from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the pretty-printed JSON form used by exports.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find_event(&self, id: &str) -> Option<&RoomEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Parse a calendar payload destined for an existing room, rejecting
/// payloads whose `roomId` does not match the target.
pub fn import_calendar(json: &str, expected_room_id: &str) -> Result<RoomCalendar> {
    let calendar = RoomCalendar::from_json(json)?;
    if calendar.room_id != expected_room_id {
        return Err(BookingError::RoomMismatch {
            expected: expected_room_id.to_string(),
            payload: calendar.room_id,
        });
    }
    Ok(calendar)
}
