//! Grid-interaction state machine for calendar front ends.
//!
//! A drag/create/move/resize gesture is modelled as an explicit state value
//! transitioned by discrete inputs — no hidden UI mutability, and the
//! booking engine never sees interaction state. When a gesture finishes,
//! [`transition`] emits an [`EditAction`] the caller turns into an
//! [`crate::mutate::add_event`] or [`crate::mutate::update_event`] call.
//!
//! Dragged positions snap to the calendar's rounding grid, and working
//! intervals never shrink below one step.

use chrono::{DateTime, Duration, FixedOffset};

use crate::timegrid::{round_to_step, Rounding};

/// The interval a gesture is currently shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Where a gesture stands. Non-idle states carry the working interval and,
/// for gestures anchored to an existing event, its id.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Idle,
    Creating {
        working: Interval,
    },
    Moving {
        event_id: String,
        working: Interval,
    },
    ResizingStart {
        event_id: String,
        working: Interval,
    },
    ResizingEnd {
        event_id: String,
        working: Interval,
    },
}

/// Discrete gesture inputs, as translated from pointer events by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum EditInput {
    /// Pointer went down on empty grid space.
    BeginCreate { at: DateTime<FixedOffset> },
    /// Pointer went down on an event body.
    BeginMove { event_id: String, interval: Interval },
    /// Pointer went down on an event's leading edge.
    BeginResizeStart { event_id: String, interval: Interval },
    /// Pointer went down on an event's trailing edge.
    BeginResizeEnd { event_id: String, interval: Interval },
    /// Pointer moved while a gesture is active.
    DragTo { at: DateTime<FixedOffset> },
    /// Pointer released — commit the gesture.
    Finish,
    /// Gesture abandoned (escape key, pointer left the grid).
    Abort,
}

/// What a finished gesture asks the engine to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    Create { interval: Interval },
    Update { event_id: String, interval: Interval },
}

/// Advance the gesture state machine by one input.
///
/// Returns the next state and, on `Finish` from an active gesture, the
/// action to hand to the mutator. Inputs that make no sense in the current
/// state leave it unchanged.
pub fn transition(
    state: EditState,
    input: EditInput,
    step_mins: u32,
) -> (EditState, Option<EditAction>) {
    let step = Duration::minutes(i64::from(step_mins));

    match (state, input) {
        (EditState::Idle, EditInput::BeginCreate { at }) => {
            let start = round_to_step(at, step_mins, Rounding::Down);
            let working = Interval {
                start,
                end: start + step,
            };
            (EditState::Creating { working }, None)
        }
        (EditState::Idle, EditInput::BeginMove { event_id, interval }) => {
            (EditState::Moving { event_id, working: interval }, None)
        }
        (EditState::Idle, EditInput::BeginResizeStart { event_id, interval }) => {
            (EditState::ResizingStart { event_id, working: interval }, None)
        }
        (EditState::Idle, EditInput::BeginResizeEnd { event_id, interval }) => {
            (EditState::ResizingEnd { event_id, working: interval }, None)
        }

        (EditState::Creating { working }, EditInput::DragTo { at }) => {
            let end = round_to_step(at, step_mins, Rounding::Up).max(working.start + step);
            let working = Interval {
                start: working.start,
                end,
            };
            (EditState::Creating { working }, None)
        }
        (EditState::Moving { event_id, working }, EditInput::DragTo { at }) => {
            let duration = working.end - working.start;
            let start = round_to_step(at, step_mins, Rounding::Down);
            let working = Interval {
                start,
                end: start + duration,
            };
            (EditState::Moving { event_id, working }, None)
        }
        (EditState::ResizingStart { event_id, working }, EditInput::DragTo { at }) => {
            let start = round_to_step(at, step_mins, Rounding::Down).min(working.end - step);
            let working = Interval {
                start,
                end: working.end,
            };
            (EditState::ResizingStart { event_id, working }, None)
        }
        (EditState::ResizingEnd { event_id, working }, EditInput::DragTo { at }) => {
            let end = round_to_step(at, step_mins, Rounding::Up).max(working.start + step);
            let working = Interval {
                start: working.start,
                end,
            };
            (EditState::ResizingEnd { event_id, working }, None)
        }

        (EditState::Creating { working }, EditInput::Finish) => (
            EditState::Idle,
            Some(EditAction::Create { interval: working }),
        ),
        (EditState::Moving { event_id, working }, EditInput::Finish)
        | (EditState::ResizingStart { event_id, working }, EditInput::Finish)
        | (EditState::ResizingEnd { event_id, working }, EditInput::Finish) => (
            EditState::Idle,
            Some(EditAction::Update {
                event_id,
                interval: working,
            }),
        ),

        (_, EditInput::Abort) => (EditState::Idle, None),

        (state, _) => (state, None),
    }
}
