//! Weekly opening-hours coverage.
//!
//! Decides whether an event falls outside the room's configured opening
//! hours. The event's interval is segmented at local midnight in the
//! calendar's zone; each day segment must be fully contained in one of that
//! weekday's open ranges. Overlapping or adjacent open ranges are unioned
//! before the containment test, so a segment spanning `08:00–12:00` and
//! `12:00–18:00` counts as covered while one straddling a genuine gap does
//! not.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::model::{HoursRange, RoomCalendar, RoomEvent, Weekday};

/// True when any part of the event's interval falls outside the configured
/// opening hours. A calendar without an `openingHours` map is always open,
/// so every event is in-hours.
pub fn detect_ooh(calendar: &RoomCalendar, event: &RoomEvent) -> bool {
    let Some(hours) = calendar.opening_hours.as_ref() else {
        return false;
    };

    let start = event.starts_at.with_timezone(&calendar.timezone).naive_local();
    let end = event.ends_at.with_timezone(&calendar.timezone).naive_local();
    if end <= start {
        return false;
    }

    let mut day = start.date();
    let last = end.date();
    while day <= last {
        let seg_start = if day == start.date() { minute_of(start) } else { 0 };
        let seg_end = if day == end.date() { minute_of(end) } else { 1440 };

        if seg_start < seg_end {
            let open = hours
                .get(&Weekday::from(day.weekday()))
                .map(|ranges| merge_open_ranges(ranges))
                .unwrap_or_default();
            let covered = open
                .iter()
                .any(|&(open_start, open_end)| open_start <= seg_start && seg_end <= open_end);
            if !covered {
                return true;
            }
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    false
}

fn minute_of(ts: NaiveDateTime) -> u16 {
    (ts.hour() * 60 + ts.minute()) as u16
}

/// Sort a day's open ranges and union overlapping or adjacent ones.
/// Inverted ranges are dropped.
fn merge_open_ranges(ranges: &[HoursRange]) -> Vec<(u16, u16)> {
    let mut minutes: Vec<(u16, u16)> = ranges
        .iter()
        .map(|r| (r.start.minutes(), r.end.minutes()))
        .filter(|(start, end)| start < end)
        .collect();
    minutes.sort_unstable();

    let mut merged: Vec<(u16, u16)> = Vec::new();
    for (start, end) in minutes {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}
