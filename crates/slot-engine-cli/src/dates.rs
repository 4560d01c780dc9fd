//! Resolve the `--start-date` argument into an instant.
//!
//! Accepts `today`, `tomorrow`, an ISO date (`2024-01-05`), or an RFC 3339
//! timestamp. Relative terms are resolved against a `now` read once by the
//! caller; the engine itself never reads the clock.

use anyhow::{bail, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use slot_engine::local_midnight;

pub fn resolve_start_date(input: &str, now: DateTime<Utc>, tz: Tz) -> Result<DateTime<Utc>> {
    let today = now.with_timezone(&tz).date_naive();
    let day = match input.trim().to_lowercase().as_str() {
        "today" => today,
        "tomorrow" => today
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX),
        other => {
            if let Ok(date) = NaiveDate::parse_from_str(other, "%Y-%m-%d") {
                date
            } else if let Ok(dt) = DateTime::parse_from_rfc3339(input.trim()) {
                return Ok(dt.with_timezone(&Utc));
            } else {
                bail!(
                    "Invalid start date '{}': expected 'today', 'tomorrow', YYYY-MM-DD, or RFC 3339",
                    input
                );
            }
        }
    };
    Ok(local_midnight(day, &tz))
}

pub fn parse_now(input: &str) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => bail!("Invalid --now '{}': {}", input, e),
    }
}
