//! Tests for the copy-on-write calendar mutations.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use chrono_tz::Europe::Berlin;
use roomcal_engine::conflict::{apply_buffers, intervals_overlap};
use roomcal_engine::error::BookingError;
use roomcal_engine::model::{EventKind, EventStatus, RoomCalendar, RoomEvent, RoundingStep};
use roomcal_engine::mutate::{add_event, delete_event, update_event};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn ts(s: &str) -> DateTime<FixedOffset> {
    s.parse().unwrap()
}

/// A fixed clock two weeks before the fixture events.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
}

fn calendar(room: &str) -> RoomCalendar {
    RoomCalendar {
        room_id: room.to_string(),
        timezone: Berlin,
        default_pre_buffer_mins: 0,
        default_post_buffer_mins: 0,
        rounding_step_mins: RoundingStep::M30,
        min_lead_time_mins: 0,
        max_lead_time_days: 365,
        half_day_cutoff_hour: None,
        day_cutoff_hour: None,
        opening_hours: None,
        events: vec![],
    }
}

fn event(id: &str, room: &str, start: &str, end: &str) -> RoomEvent {
    RoomEvent {
        id: id.to_string(),
        room_id: room.to_string(),
        kind: EventKind::Booking,
        status: EventStatus::Confirmed,
        starts_at: ts(start),
        ends_at: ts(end),
        title: None,
        notes: None,
        created_by: "tests".to_string(),
        created_at: ts("2026-01-01T00:00:00+00:00"),
        recurrence: None,
        pre_buffer_mins: None,
        post_buffer_mins: None,
    }
}

// ── add_event ───────────────────────────────────────────────────────────────

#[test]
fn add_appends_and_leaves_the_original_untouched() {
    let cal = calendar("room-a");
    let ev = event(
        "e1",
        "room-a",
        "2026-09-14T09:00:00+02:00",
        "2026-09-14T10:00:00+02:00",
    );

    let next = add_event(&cal, ev, now()).unwrap();
    assert_eq!(next.events.len(), 1);
    assert_eq!(next.events[0].id, "e1");
    // Copy-on-write: the input calendar is unchanged.
    assert!(cal.events.is_empty());
}

#[test]
fn add_rejects_events_for_another_room() {
    let cal = calendar("room-a");
    let ev = event(
        "e1",
        "room-b",
        "2026-09-14T09:00:00+02:00",
        "2026-09-14T10:00:00+02:00",
    );
    assert!(matches!(
        add_event(&cal, ev, now()),
        Err(BookingError::RoomMismatch { .. })
    ));
}

#[test]
fn add_rejects_a_reused_event_id() {
    let cal = calendar("room-a");
    let cal = add_event(
        &cal,
        event(
            "e1",
            "room-a",
            "2026-09-14T09:00:00+02:00",
            "2026-09-14T10:00:00+02:00",
        ),
        now(),
    )
    .unwrap();

    let dup = event(
        "e1",
        "room-a",
        "2026-09-14T14:00:00+02:00",
        "2026-09-14T15:00:00+02:00",
    );
    assert!(matches!(
        add_event(&cal, dup, now()),
        Err(BookingError::DuplicateId { .. })
    ));
}

#[test]
fn add_rejects_off_grid_boundaries() {
    let cal = calendar("room-a");
    let ev = event(
        "e1",
        "room-a",
        "2026-09-14T09:10:00+02:00",
        "2026-09-14T10:00:00+02:00",
    );
    match add_event(&cal, ev, now()) {
        Err(BookingError::StepMisalignment { step }) => assert_eq!(step, 30),
        other => panic!("expected StepMisalignment, got {other:?}"),
    }
}

#[test]
fn step_misalignment_reason_names_the_grid() {
    let cal = calendar("room-a");
    let ev = event(
        "e1",
        "room-a",
        "2026-09-14T09:10:00+02:00",
        "2026-09-14T10:00:00+02:00",
    );
    let reason = add_event(&cal, ev, now()).unwrap_err().to_string();
    assert!(reason.contains("align to 30-minute steps"), "was: {reason}");
}

#[test]
fn add_rejects_starts_inside_the_minimum_lead_time() {
    let mut cal = calendar("room-a");
    cal.min_lead_time_mins = 120;

    // Now is 12:00 UTC; a 13:00 UTC start is only 60 minutes out.
    let ev = event(
        "e1",
        "room-a",
        "2026-09-01T13:00:00+00:00",
        "2026-09-01T14:00:00+00:00",
    );
    let reason = add_event(&cal, ev, now()).unwrap_err().to_string();
    assert!(reason.contains("inside the minimum lead time"), "was: {reason}");
}

#[test]
fn add_rejects_starts_beyond_the_maximum_lead_time() {
    let mut cal = calendar("room-a");
    cal.max_lead_time_days = 7;

    let ev = event(
        "e1",
        "room-a",
        "2026-10-14T09:00:00+02:00",
        "2026-10-14T10:00:00+02:00",
    );
    let reason = add_event(&cal, ev, now()).unwrap_err().to_string();
    assert!(reason.contains("beyond the maximum lead time"), "was: {reason}");
}

#[test]
fn add_rejects_conflicts_with_existing_events() {
    let cal = calendar("room-a");
    let cal = add_event(
        &cal,
        event(
            "e1",
            "room-a",
            "2026-09-14T09:00:00+02:00",
            "2026-09-14T10:00:00+02:00",
        ),
        now(),
    )
    .unwrap();

    let overlapping = event(
        "e2",
        "room-a",
        "2026-09-14T09:30:00+02:00",
        "2026-09-14T10:30:00+02:00",
    );
    assert!(matches!(
        add_event(&cal, overlapping, now()),
        Err(BookingError::Conflict { .. })
    ));
}

// ── update_event ────────────────────────────────────────────────────────────

#[test]
fn update_replaces_in_place_and_preserves_position() {
    let cal = calendar("room-a");
    let cal = add_event(
        &cal,
        event(
            "e1",
            "room-a",
            "2026-09-14T09:00:00+02:00",
            "2026-09-14T10:00:00+02:00",
        ),
        now(),
    )
    .unwrap();
    let cal = add_event(
        &cal,
        event(
            "e2",
            "room-a",
            "2026-09-14T14:00:00+02:00",
            "2026-09-14T15:00:00+02:00",
        ),
        now(),
    )
    .unwrap();

    let mut moved = event(
        "e1",
        "room-a",
        "2026-09-14T10:00:00+02:00",
        "2026-09-14T11:00:00+02:00",
    );
    moved.title = Some("Moved".to_string());

    let next = update_event(&cal, moved).unwrap();
    assert_eq!(next.events.len(), 2);
    assert_eq!(next.events[0].id, "e1");
    assert_eq!(next.events[0].title.as_deref(), Some("Moved"));
    assert_eq!(next.events[1].id, "e2");
}

#[test]
fn update_of_an_unknown_id_is_not_found() {
    let cal = calendar("room-a");
    let ev = event(
        "ghost",
        "room-a",
        "2026-09-14T09:00:00+02:00",
        "2026-09-14T10:00:00+02:00",
    );
    match update_event(&cal, ev) {
        Err(BookingError::NotFound { id }) => assert_eq!(id, "ghost"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn update_does_not_revalidate_grid_or_lead_time() {
    let cal = calendar("room-a");
    let cal = add_event(
        &cal,
        event(
            "e1",
            "room-a",
            "2026-09-14T09:00:00+02:00",
            "2026-09-14T10:00:00+02:00",
        ),
        now(),
    )
    .unwrap();

    // Off-grid boundaries and a start in the distant past both pass — only
    // the overlap check runs on update.
    let reshaped = event(
        "e1",
        "room-a",
        "2020-01-01T09:10:00+02:00",
        "2020-01-01T09:55:00+02:00",
    );
    assert!(update_event(&cal, reshaped).is_ok());
}

#[test]
fn update_still_rejects_conflicts() {
    let cal = calendar("room-a");
    let cal = add_event(
        &cal,
        event(
            "e1",
            "room-a",
            "2026-09-14T09:00:00+02:00",
            "2026-09-14T10:00:00+02:00",
        ),
        now(),
    )
    .unwrap();
    let cal = add_event(
        &cal,
        event(
            "e2",
            "room-a",
            "2026-09-14T14:00:00+02:00",
            "2026-09-14T15:00:00+02:00",
        ),
        now(),
    )
    .unwrap();

    let onto_e2 = event(
        "e1",
        "room-a",
        "2026-09-14T14:30:00+02:00",
        "2026-09-14T15:30:00+02:00",
    );
    match update_event(&cal, onto_e2).unwrap_err() {
        BookingError::Conflict { with, .. } => assert_eq!(with.id, "e2"),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

// ── delete_event ────────────────────────────────────────────────────────────

#[test]
fn delete_removes_the_matching_event() {
    let cal = calendar("room-a");
    let cal = add_event(
        &cal,
        event(
            "e1",
            "room-a",
            "2026-09-14T09:00:00+02:00",
            "2026-09-14T10:00:00+02:00",
        ),
        now(),
    )
    .unwrap();

    let next = delete_event(&cal, "e1");
    assert!(next.events.is_empty());
    assert_eq!(cal.events.len(), 1);
}

#[test]
fn delete_of_an_absent_id_is_a_noop() {
    let cal = calendar("room-a");
    let next = delete_event(&cal, "ghost");
    assert_eq!(next, cal);
}

// ── Invariant ───────────────────────────────────────────────────────────────

#[test]
fn successful_mutations_never_leave_overlapping_buffered_intervals() {
    let mut cal = calendar("room-a");
    cal.default_pre_buffer_mins = 15;
    cal.default_post_buffer_mins = 15;

    let candidates = [
        ("a", "2026-09-14T09:00:00+02:00", "2026-09-14T10:00:00+02:00"),
        ("b", "2026-09-14T10:00:00+02:00", "2026-09-14T11:00:00+02:00"), // buffered conflict with a
        ("c", "2026-09-14T11:00:00+02:00", "2026-09-14T12:00:00+02:00"),
        ("d", "2026-09-14T14:00:00+02:00", "2026-09-14T15:00:00+02:00"),
        ("e", "2026-09-14T14:30:00+02:00", "2026-09-14T15:30:00+02:00"), // conflict with d
    ];

    for (id, start, end) in candidates {
        if let Ok(next) = add_event(&cal, event(id, "room-a", start, end), now()) {
            cal = next;
        }
    }

    for (i, a) in cal.events.iter().enumerate() {
        for b in cal.events.iter().skip(i + 1) {
            let (a_start, a_end) = apply_buffers(a, &cal);
            let (b_start, b_end) = apply_buffers(b, &cal);
            assert!(
                !intervals_overlap(a_start, a_end, b_start, b_end),
                "events {} and {} overlap after mutation sequence",
                a.id,
                b.id
            );
        }
    }
}
