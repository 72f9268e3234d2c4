//! `allocation` CLI: inspect an allocation session from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Calendar cells for the default hour range (07-23)
//! allocation grid
//!
//! # Calendar cells from a config file, overriding the first hour
//! allocation grid --config calendar.json --first-hour 8
//!
//! # Drag selection between two cells, plus its submission window
//! allocation series 2-10-30 2-9-00
//!
//! # Requested slots of every schedule in a session (stdin → stdout)
//! cat session.json | allocation slots
//!
//! # Accepted/declined slots
//! allocation statuses -i session.json
//!
//! # Density, matching events and status of the session's selection
//! allocation selection -i session.json
//!
//! # Rank candidate events for the selection (secondary tier)
//! allocation rank -i session.json --priority 200
//!
//! # End-time picker options for Wednesday 09:30-12:00
//! allocation options --day 2 --start-hour 9 --start-minute 30 --end-hour 11 --end
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` / `-vv`.

use std::io::{self, Read};

use allocation_engine::{
    application_for_event, are_slots_on_status, rank_application_events,
    schedule_result_statuses, selection_between, selection_schedule_window,
    slot_application_event_count, slot_application_events, time_slot_options, time_slots,
    AllocationSession, CalendarConfig, DayOfWeek, Priority, SlotId, SlotStatus,
};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "allocation",
    version,
    about = "Slot grid, matching and ranking tools for recurring-reservation allocation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the weekly calendar grid
    Grid {
        /// JSON calendar config (`{"firstHour": 7, "lastHour": 23}`)
        #[arg(long)]
        config: Option<String>,
        /// Override the first hour row
        #[arg(long)]
        first_hour: Option<u8>,
        /// Override the last hour row
        #[arg(long)]
        last_hour: Option<u8>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Selection between two slot keys, in either order
    Series {
        /// Slot where the drag started, e.g. 2-9-00
        anchor: String,
        /// Slot where the drag is now
        current: String,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Expand every requested schedule of a session into slots
    Slots {
        /// Session JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Accepted and declined slots of a session
    Statuses {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report on the session's current selection
    Selection {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Rank candidate events against the session's selection
    Rank {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Schedule priority tier (300 primary, 200 secondary)
        #[arg(long, default_value_t = Priority::PRIMARY.0)]
        priority: u16,
    },
    /// Start or end picker options for a day
    Options {
        /// Day of week, 0 = Monday
        #[arg(long)]
        day: u8,
        #[arg(long)]
        start_hour: u8,
        #[arg(long, default_value_t = 0)]
        start_minute: u8,
        #[arg(long)]
        end_hour: u8,
        /// Produce end-time options
        #[arg(long)]
        end: bool,
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Begin/end boundaries as the backend expects them.
#[derive(Serialize)]
struct ScheduleWindowDto {
    begin: String,
    end: String,
}

#[derive(Serialize)]
struct SeriesReport {
    selection: Vec<SlotId>,
    window: Option<ScheduleWindowDto>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleSlots {
    event_pk: u64,
    schedule_pk: u64,
    priority: Priority,
    slots: Vec<SlotId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionReport {
    selection: Vec<SlotId>,
    window: Option<ScheduleWindowDto>,
    schedule_count: usize,
    event_pks: Vec<u64>,
    fully_accepted: bool,
    fully_declined: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankRow {
    pk: u64,
    name: String,
    applicant: String,
    matching_percentage: f64,
    earliest_start: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Grid {
            config,
            first_hour,
            last_hour,
            output,
        } => {
            let config = load_calendar_config(config.as_deref(), first_hour, last_hour)?;
            tracing::debug!(
                first_hour = config.first_hour,
                last_hour = config.last_hour,
                "building calendar grid"
            );
            write_json(output.as_deref(), &config.cells())?;
        }
        Commands::Series {
            anchor,
            current,
            output,
        } => {
            let anchor = parse_slot(&anchor)?;
            let current = parse_slot(&current)?;
            let selection = selection_between(anchor, current);
            let report = SeriesReport {
                window: window_dto(&selection),
                selection,
            };
            write_json(output.as_deref(), &report)?;
        }
        Commands::Slots { input, output } => {
            let session = read_session(input.as_deref())?;
            let rows: Vec<ScheduleSlots> = session
                .application_events
                .iter()
                .flat_map(|event| {
                    event.schedules.iter().map(move |schedule| ScheduleSlots {
                        event_pk: event.pk,
                        schedule_pk: schedule.pk,
                        priority: schedule.priority,
                        slots: time_slots([schedule.window()]),
                    })
                })
                .collect();
            write_json(output.as_deref(), &rows)?;
        }
        Commands::Statuses { input, output } => {
            let session = read_session(input.as_deref())?;
            let statuses = schedule_result_statuses(&session.application_events);
            write_json(output.as_deref(), &statuses)?;
        }
        Commands::Selection { input, output } => {
            let session = read_session(input.as_deref())?;
            let events = &session.application_events;
            let selection = &session.selection;
            let statuses = schedule_result_statuses(events);
            let report = SelectionReport {
                window: window_dto(selection),
                schedule_count: slot_application_event_count(selection, events),
                event_pks: slot_application_events(selection, events)
                    .iter()
                    .map(|event| event.pk)
                    .collect(),
                fully_accepted: !selection.is_empty()
                    && are_slots_on_status(selection, &statuses, SlotStatus::Accepted),
                fully_declined: !selection.is_empty()
                    && are_slots_on_status(selection, &statuses, SlotStatus::Declined),
                selection: selection.clone(),
            };
            write_json(output.as_deref(), &report)?;
        }
        Commands::Rank {
            input,
            output,
            priority,
        } => {
            let session = read_session(input.as_deref())?;
            if session.selection.is_empty() {
                tracing::warn!("session has no selection; nothing to rank");
            }
            let rows: Vec<RankRow> = rank_application_events(
                &session.application_events,
                &session.selection,
                Priority(priority),
            )
            .into_iter()
            .map(|ranked| RankRow {
                pk: ranked.event.pk,
                name: ranked.event.name.clone(),
                applicant: application_for_event(&session.applications, ranked.event)
                    .map(|application| application.applicant_name().to_string())
                    .unwrap_or_default(),
                matching_percentage: ranked.matching_percentage,
                earliest_start: ranked
                    .earliest_start
                    .map(|time| time.format("%H:%M:%S").to_string()),
            })
            .collect();
            write_json(output.as_deref(), &rows)?;
        }
        Commands::Options {
            day,
            start_hour,
            start_minute,
            end_hour,
            end,
            output,
        } => {
            let day = DayOfWeek::new(day).context("Invalid --day")?;
            let options = time_slot_options(day, start_hour, start_minute, end_hour, end);
            write_json(output.as_deref(), &options)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Defaults, then the config file, then individual flag overrides.
fn load_calendar_config(
    path: Option<&str>,
    first_hour: Option<u8>,
    last_hour: Option<u8>,
) -> Result<CalendarConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            CalendarConfig::parse(&json)
                .with_context(|| format!("Invalid calendar config: {}", path))?
        }
        None => CalendarConfig::default(),
    };
    if let Some(hour) = first_hour {
        config.first_hour = hour;
    }
    if let Some(hour) = last_hour {
        config.last_hour = hour;
    }
    config.validate().context("Invalid calendar hour range")
}

fn parse_slot(key: &str) -> Result<SlotId> {
    key.parse()
        .with_context(|| format!("Invalid slot key: {}", key))
}

fn window_dto(selection: &[SlotId]) -> Option<ScheduleWindowDto> {
    selection_schedule_window(selection).map(|(begin, end)| ScheduleWindowDto { begin, end })
}

fn read_session(path: Option<&str>) -> Result<AllocationSession> {
    let json = read_input(path)?;
    let session = AllocationSession::from_json(&json).context("Failed to parse session JSON")?;
    tracing::debug!(
        events = session.application_events.len(),
        selection = session.selection.len(),
        "loaded allocation session"
    );
    Ok(session.scoped_to_reservation_unit())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
