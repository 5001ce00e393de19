//! # roomcal-engine
//!
//! Deterministic room availability engine for booking platforms.
//!
//! The engine decides whether a requested time window can be booked on a
//! room calendar, enforcing buffered-conflict, opening-hours, rounding-grid
//! and lead-time rules. Every operation is synchronous and pure: mutations
//! are copy-on-write and return a new [`model::RoomCalendar`] value, and the
//! clock is always an explicit parameter, so identical inputs always produce
//! identical results.
//!
//! ## Modules
//!
//! - [`model`] — room calendars, events, opening hours, JSON import/export
//! - [`timegrid`] — step-grid rounding and alignment checks
//! - [`conflict`] — buffered-interval overlap detection
//! - [`hours`] — weekly opening-hours coverage (out-of-hours flag)
//! - [`leadtime`] — minimum/maximum booking horizon
//! - [`mutate`] — add/update/delete events, composing the checks above
//! - [`slots`] — step-aligned free-slot enumeration
//! - [`query`] — availability checks and multi-room search with suggestions
//! - [`ics`] — iCalendar export of non-cancelled events
//! - [`interaction`] — pure drag/resize state machine for grid front ends
//! - [`error`] — error types

pub mod conflict;
pub mod error;
pub mod hours;
pub mod ics;
pub mod interaction;
pub mod leadtime;
pub mod model;
pub mod mutate;
pub mod query;
pub mod slots;
pub mod timegrid;

pub use conflict::{apply_buffers, check_overlap, intervals_overlap};
pub use error::{BookingError, Result};
pub use hours::detect_ooh;
pub use ics::to_ics;
pub use leadtime::within_lead_times;
pub use model::{import_calendar, EventKind, EventStatus, RoomCalendar, RoomEvent};
pub use mutate::{add_event, delete_event, update_event};
pub use query::{
    is_available, search_availability, Availability, AvailabilityQuery, AvailabilitySearch,
};
pub use slots::{list_free_slots, FreeSlot};
pub use timegrid::{is_on_step, round_to_step, Rounding};
