//! Load an already-fetched free/busy response from JSON.
//!
//! The layout mirrors a calendar backend's freebusy reply:
//!
//! ```json
//! {"calendars": {
//!   "primary": {"busy": [{"start": "2024-01-01T09:00:00Z", "end": "2024-01-01T10:00:00Z"}]},
//!   "b@y.com": {"busy": [], "errors": [{"domain": "global", "reason": "notFound"}]}
//! }}
//! ```
//!
//! A calendar with a non-empty `errors` list is inaccessible. Calendars
//! missing from the file are inaccessible too, but that is decided by the
//! engine, not here.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use slot_engine::{CalendarBusy, FreeBusyResponse, StaticFreeBusy};

#[derive(Deserialize)]
struct FreeBusyFile {
    #[serde(default)]
    calendars: BTreeMap<String, CalendarEntry>,
}

#[derive(Deserialize)]
struct CalendarEntry {
    #[serde(default)]
    busy: Vec<BusyPeriod>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct BusyPeriod {
    start: String,
    end: String,
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset) and naive `YYYY-MM-DDTHH:MM:SS`, which is
/// interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .with_context(|| format!("Invalid datetime '{}'", s))
}

pub fn parse_free_busy(json: &str) -> Result<FreeBusyResponse> {
    let file: FreeBusyFile = serde_json::from_str(json).context("Invalid free/busy JSON")?;

    let mut response = FreeBusyResponse::new();
    for (id, entry) in file.calendars {
        if !entry.errors.is_empty() {
            response.insert(id, CalendarBusy::Inaccessible);
            continue;
        }
        let pairs = entry
            .busy
            .iter()
            .map(|period| -> Result<_> {
                Ok((parse_datetime(&period.start)?, parse_datetime(&period.end)?))
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid busy period for calendar '{}'", id))?;
        response.insert(id, CalendarBusy::from_pairs(pairs));
    }
    Ok(response)
}

/// A [`StaticFreeBusy`] source backed by the parsed file.
pub fn load_source(json: &str) -> Result<StaticFreeBusy> {
    Ok(StaticFreeBusy::new(parse_free_busy(json)?))
}
