//! `roomcal` CLI — query room availability from calendar JSON files.
//!
//! ## Usage
//!
//! ```sh
//! # Search every calendar for a free window, with alternatives
//! roomcal search -c rooms/*.json --from 2030-06-17T09:00:00+02:00 --to 2030-06-17T10:00:00+02:00
//!
//! # Restrict the search and widen the suggestion horizon
//! roomcal search -c rooms/*.json --from ... --to ... --rooms room-a,room-b --suggest-days 3
//!
//! # Check one room for one window (exit code 1 when unavailable)
//! roomcal check -c rooms/alpine.json --from ... --to ...
//!
//! # List free step-aligned slots
//! roomcal free-slots -c rooms/alpine.json --from ... --to ... --step 30
//!
//! # Export the non-cancelled events as iCalendar text
//! roomcal export-ics -c rooms/alpine.json -o alpine.ics
//!
//! # Validate a calendar payload against its target room
//! roomcal validate -c payload.json --room room-alpine
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::process;

use roomcal_engine::ics::to_ics;
use roomcal_engine::model::{import_calendar, RoomCalendar};
use roomcal_engine::query::{is_available, search_availability, AvailabilityQuery};
use roomcal_engine::slots::list_free_slots;

#[derive(Parser)]
#[command(name = "roomcal", version, about = "Room availability engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search room calendars for a free window, with day-shifted alternatives
    Search {
        /// Calendar JSON files, one per room
        #[arg(short, long, required = true, num_args = 1..)]
        calendar: Vec<String>,
        /// Window start (RFC 3339, with UTC offset)
        #[arg(long)]
        from: String,
        /// Window end (RFC 3339, with UTC offset)
        #[arg(long)]
        to: String,
        /// Comma-separated room ids to restrict the search
        #[arg(long)]
        rooms: Option<String>,
        /// How many days around the window to probe for alternatives
        #[arg(long, default_value_t = 2)]
        suggest_days: u32,
    },
    /// Check a single room for a single window
    Check {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// List free step-aligned slots in a time range
    FreeSlots {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Slot width in minutes (defaults to the calendar's rounding step)
        #[arg(long)]
        step: Option<u32>,
    },
    /// Export a calendar's non-cancelled events as iCalendar text
    ExportIcs {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a calendar payload against a target room id
    Validate {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
        /// The room the payload must target
        #[arg(long)]
        room: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            calendar,
            from,
            to,
            rooms,
            suggest_days,
        } => {
            let calendars = calendar
                .iter()
                .map(|path| load_calendar(path))
                .collect::<Result<Vec<_>>>()?;
            let query = AvailabilityQuery {
                from: parse_ts(&from)?,
                to: parse_ts(&to)?,
                room_ids: rooms.map(|csv| csv.split(',').map(str::to_string).collect()),
                suggest_days,
            };
            let result = search_availability(&calendars, &query, Utc::now());
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Check { calendar, from, to } => {
            let cal = load_calendar(&calendar)?;
            let result = is_available(&cal, parse_ts(&from)?, parse_ts(&to)?, Utc::now());
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.available {
                process::exit(1);
            }
        }
        Commands::FreeSlots {
            calendar,
            from,
            to,
            step,
        } => {
            let cal = load_calendar(&calendar)?;
            let step = step.unwrap_or_else(|| cal.rounding_step_mins.minutes());
            let slots = list_free_slots(&cal, parse_ts(&from)?, parse_ts(&to)?, step, Utc::now());
            for slot in &slots {
                println!("{} - {}", slot.start.to_rfc3339(), slot.end.to_rfc3339());
            }
        }
        Commands::ExportIcs { calendar, output } => {
            let cal = load_calendar(&calendar)?;
            let ics = to_ics(&cal, Utc::now());
            match output {
                Some(path) => fs::write(&path, ics)
                    .with_context(|| format!("failed to write {path}"))?,
                None => print!("{ics}"),
            }
        }
        Commands::Validate { calendar, room } => {
            let raw = fs::read_to_string(&calendar)
                .with_context(|| format!("failed to read {calendar}"))?;
            let cal = import_calendar(&raw, &room)
                .with_context(|| format!("rejected calendar payload {calendar}"))?;
            println!(
                "OK: calendar for {} with {} event(s)",
                cal.room_id,
                cal.events.len()
            );
        }
    }

    Ok(())
}

fn load_calendar(path: &str) -> Result<RoomCalendar> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    RoomCalendar::from_json(&raw).with_context(|| format!("failed to parse calendar {path}"))
}

fn parse_ts(raw: &str) -> Result<DateTime<FixedOffset>> {
    raw.parse()
        .with_context(|| format!("expected an RFC 3339 timestamp with offset, got {raw:?}"))
}
