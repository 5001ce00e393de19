//! iCalendar export of a room calendar's non-cancelled events.

use chrono::{DateTime, Utc};

use crate::model::RoomCalendar;

/// Serialize a calendar as a single `VCALENDAR` block with one `VEVENT` per
/// non-cancelled event.
///
/// `exported_at` becomes every event's `DTSTAMP`; `DTSTART`/`DTEND` are
/// converted to UTC. `SUMMARY` is the event title, or its type token when
/// untitled; `DESCRIPTION` appears only when the event carries notes. Lines
/// are CRLF-terminated.
pub fn to_ics(calendar: &RoomCalendar, exported_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//roomcal//roomcal-engine//EN".to_string(),
    ];

    for event in calendar.events.iter().filter(|e| !e.is_cancelled()) {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@{}", event.id, calendar.room_id));
        lines.push(format!("DTSTAMP:{}", format_utc(exported_at)));
        lines.push(format!(
            "DTSTART:{}",
            format_utc(event.starts_at.with_timezone(&Utc))
        ));
        lines.push(format!(
            "DTEND:{}",
            format_utc(event.ends_at.with_timezone(&Utc))
        ));
        let summary = event
            .title
            .clone()
            .unwrap_or_else(|| event.kind.to_string());
        lines.push(format!("SUMMARY:{}", escape_text(&summary)));
        if let Some(notes) = &event.notes {
            lines.push(format!("DESCRIPTION:{}", escape_text(notes)));
        }
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

fn format_utc(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Backslash-escape the four reserved text characters: backslash itself
/// (first), semicolon, comma, and newline.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
