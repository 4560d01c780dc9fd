//! `freeslots` CLI — find meeting slots that are free on every calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Free 60-minute slots this week, busy data piped in
//! cat freebusy.json | freeslots find --start-date today --duration 60
//!
//! # Two participants, Berlin working hours, from a file
//! freeslots find --start-date 2024-01-08 --timezone Europe/Berlin \
//!   --email a@x.com --email b@y.com -i freebusy.json
//!
//! # Machine-readable output with settings from a TOML file
//! freeslots find --start-date tomorrow --config freeslots.toml --format json -i freebusy.json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

mod dates;
mod freebusy_file;
mod render;
mod settings;

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::{find_availability, parse_timezone, AvailabilityQuery, WorkingHours};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "freeslots",
    version,
    about = "Find meeting slots free for every participant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Find free slots across your calendar and any participants
    Find {
        /// First day to search: today, tomorrow, YYYY-MM-DD, or RFC 3339
        #[arg(long)]
        start_date: String,
        /// Number of days to look ahead [default: 5]
        #[arg(long)]
        days: Option<u32>,
        /// Meeting length in minutes [default: 30]
        #[arg(long)]
        duration: Option<u32>,
        /// First working hour, 0-23 [default: 9]
        #[arg(long)]
        start_hour: Option<u32>,
        /// End of the working day, 1-24 [default: 17]
        #[arg(long)]
        end_hour: Option<u32>,
        /// IANA timezone for the search [default: UTC]
        #[arg(long)]
        timezone: Option<String>,
        /// Participant calendar ids (repeat or comma-separate)
        #[arg(long = "email", value_delimiter = ',')]
        emails: Vec<String>,
        /// Free/busy JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// TOML settings file
        #[arg(long)]
        config: Option<String>,
        /// Minutes between candidate slot starts [default: 30]
        #[arg(long)]
        step: Option<u32>,
        /// Number of slots listed before the rest are summarized [default: 10]
        #[arg(long)]
        display_cap: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Resolve relative dates against this instant instead of the clock
        #[arg(long, hide = true)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            start_date,
            days,
            duration,
            start_hour,
            end_hour,
            timezone,
            emails,
            input,
            output,
            config,
            step,
            display_cap,
            format,
            now,
        } => {
            let settings = Settings::load(config.as_deref())?;

            let tz_name = timezone
                .or(settings.timezone)
                .unwrap_or_else(|| "UTC".to_string());
            let tz = parse_timezone(&tz_name)?;

            // The only clock read; everything downstream is deterministic.
            let now = match now {
                Some(raw) => dates::parse_now(&raw)?,
                None => Utc::now(),
            };
            let range_start = dates::resolve_start_date(&start_date, now, tz)?;

            let base_hours = settings.working_hours.unwrap_or_default();
            let working_hours = WorkingHours {
                start_hour: start_hour.unwrap_or(base_hours.start_hour),
                end_hour: end_hour.unwrap_or(base_hours.end_hour),
            };

            let emails = emails
                .into_iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty());
            let mut query = AvailabilityQuery::new(range_start, tz)
                .with_working_hours(working_hours)
                .with_calendar_ids(emails);
            if let Some(d) = days.or(settings.days_to_check) {
                query = query.with_days(d);
            }
            if let Some(m) = duration.or(settings.duration_minutes) {
                query = query.with_duration_minutes(m);
            }

            let mut search = settings.search;
            if let Some(s) = step {
                search.step_minutes = s;
            }
            if let Some(cap) = display_cap {
                search.display_cap = cap;
            }

            let json = read_input(input.as_deref())?;
            let source = freebusy_file::load_source(&json)?;
            debug!(?query, ?search, "running availability query");

            match find_availability(&query, &search, &source) {
                Ok(result) => {
                    let rendered = match format {
                        Format::Text => render::render_text(&result, &query),
                        Format::Json => render::render_json(&result, &query)?,
                    };
                    write_output(output.as_deref(), &rendered)?;
                }
                Err(err) => {
                    match format {
                        Format::Text => eprintln!("{}", render::render_error_text(&err, &query)),
                        Format::Json => {
                            write_output(output.as_deref(), &render::render_error_json(&err, &query)?)?
                        }
                    }
                    process::exit(if err.is_access_error() { 2 } else { 1 });
                }
            }
        }
    }

    Ok(())
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
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
