//! Error types for booking-rule violations.
//!
//! Every decision-bearing engine operation returns `Result<T, BookingError>`.
//! All variants are recoverable business-rule failures whose `Display` text
//! is meant to be surfaced to the end user unchanged; only [`Payload`]
//! (malformed JSON, unparseable timestamps, unknown timezones) marks input
//! that should never have reached the engine.
//!
//! [`Payload`]: BookingError::Payload

use thiserror::Error;

use crate::model::{EventKind, RoomEvent};

#[derive(Error, Debug)]
pub enum BookingError {
    /// End does not fall strictly after start once buffers are applied.
    #[error("Invalid time range")]
    InvalidRange,

    /// Start or end is off the calendar's rounding grid.
    #[error("start and end must align to {step}-minute steps")]
    StepMisalignment { step: u32 },

    /// Start is too close to "now".
    #[error("start is inside the minimum lead time of {minutes} minutes")]
    InsideMinLeadTime { minutes: u32 },

    /// Start is too far ahead of "now".
    #[error("start is beyond the maximum lead time of {days} days")]
    BeyondMaxLeadTime { days: u32 },

    /// The candidate's buffered interval overlaps an existing non-cancelled
    /// event. Carries the offending event; `label` is its title, or its id
    /// when it has no title.
    #[error("overlaps {kind} \"{label}\"")]
    Conflict {
        kind: EventKind,
        label: String,
        with: Box<RoomEvent>,
    },

    /// An update referenced an event id the calendar does not contain.
    #[error("event {id} not found")]
    NotFound { id: String },

    /// An add reused an event id already present in the calendar.
    #[error("event id {id} already exists in this calendar")]
    DuplicateId { id: String },

    /// A calendar payload or event targets a different room.
    #[error("payload is for room {payload}, not {expected}")]
    RoomMismatch { expected: String, payload: String },

    /// Malformed calendar JSON. Raised at the import boundary so bad
    /// timestamps never flow through the availability logic.
    #[error("invalid calendar payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
