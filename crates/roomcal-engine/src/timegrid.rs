//! Step-grid arithmetic — rounding timestamps to the booking granularity.
//!
//! Rounding works on the *local* minute-of-day of the given timestamp, so a
//! `09:10+02:00` rounds to `09:00+02:00` or `09:30+02:00` regardless of what
//! that instant is in UTC. Seconds and sub-second components are always
//! zeroed. Both functions are pure.

use chrono::{DateTime, Duration, TimeZone, Timelike};

/// Which way to move an off-grid timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Round a timestamp to a multiple of `step_mins` within its local day.
///
/// An already-aligned timestamp (with zero seconds) is returned unchanged,
/// so rounding is idempotent. Rounding up at the end of a day may land on
/// the following local midnight.
pub fn round_to_step<Tz: TimeZone>(
    ts: DateTime<Tz>,
    step_mins: u32,
    rounding: Rounding,
) -> DateTime<Tz> {
    let step = i64::from(step_mins);
    let minute_of_day = i64::from(ts.hour() * 60 + ts.minute());
    let aligned = match rounding {
        Rounding::Down => (minute_of_day / step) * step,
        Rounding::Up => ((minute_of_day + step - 1) / step) * step,
    };
    let truncated = ts.clone()
        - Duration::seconds(i64::from(ts.second()))
        - Duration::nanoseconds(i64::from(ts.nanosecond()));
    truncated + Duration::minutes(aligned - minute_of_day)
}

/// True iff the local minute-of-day is an exact multiple of `step_mins` and
/// the timestamp carries no seconds or sub-second component.
pub fn is_on_step<Tz: TimeZone>(ts: &DateTime<Tz>, step_mins: u32) -> bool {
    (ts.hour() * 60 + ts.minute()) % step_mins == 0 && ts.second() == 0 && ts.nanosecond() == 0
}
