//! The free/busy collaborator boundary.
//!
//! The core never talks to a calendar backend itself. A host implements
//! [`FreeBusySource`] (or builds a [`FreeBusyResponse`] directly) and hands it
//! in. For each requested calendar the response holds either that calendar's
//! busy intervals or an inaccessible marker; an identifier missing from the
//! response is treated as inaccessible.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::Result;
use crate::interval::Interval;

/// Identifier of the caller's own calendar. Always queried.
pub const PRIMARY_CALENDAR: &str = "primary";

/// What the core asks the collaborator for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBusyRequest {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub timezone: Tz,
    /// Primary calendar first, then requested participants in order.
    pub calendar_ids: Vec<String>,
}

/// One calendar's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarBusy {
    Busy(Vec<Interval>),
    Inaccessible,
}

impl CalendarBusy {
    /// Build from raw `(start, end)` pairs, dropping zero-length and inverted
    /// pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
    {
        let intervals = pairs
            .into_iter()
            .filter_map(|(start, end)| match Interval::new(start, end) {
                Ok(interval) => Some(interval),
                Err(err) => {
                    warn!(%err, "dropping degenerate busy interval");
                    None
                }
            })
            .collect();
        CalendarBusy::Busy(intervals)
    }
}

/// Busy data per calendar identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeBusyResponse {
    calendars: BTreeMap<String, CalendarBusy>,
}

impl FreeBusyResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, calendar_id: impl Into<String>, busy: CalendarBusy) {
        self.calendars.insert(calendar_id.into(), busy);
    }

    pub fn with_busy(mut self, calendar_id: impl Into<String>, intervals: Vec<Interval>) -> Self {
        self.insert(calendar_id, CalendarBusy::Busy(intervals));
        self
    }

    pub fn with_inaccessible(mut self, calendar_id: impl Into<String>) -> Self {
        self.insert(calendar_id, CalendarBusy::Inaccessible);
        self
    }

    pub fn get(&self, calendar_id: &str) -> Option<&CalendarBusy> {
        self.calendars.get(calendar_id)
    }

    /// Busy intervals for an accessible calendar; `None` when the calendar is
    /// marked inaccessible or absent.
    pub fn busy_for(&self, calendar_id: &str) -> Option<&[Interval]> {
        match self.calendars.get(calendar_id)? {
            CalendarBusy::Busy(intervals) => Some(intervals),
            CalendarBusy::Inaccessible => None,
        }
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

/// Supplies busy intervals for a set of calendars.
pub trait FreeBusySource {
    /// # Errors
    /// Implementations return `SlotError::Source` when the backend itself
    /// fails. Unresolvable calendars are NOT errors; mark them inaccessible.
    fn free_busy(&self, request: &FreeBusyRequest) -> Result<FreeBusyResponse>;
}

impl<T: FreeBusySource + ?Sized> FreeBusySource for &T {
    fn free_busy(&self, request: &FreeBusyRequest) -> Result<FreeBusyResponse> {
        (**self).free_busy(request)
    }
}

/// Fixture-backed source answering from a prepared response.
#[derive(Debug, Clone, Default)]
pub struct StaticFreeBusy {
    response: FreeBusyResponse,
}

impl StaticFreeBusy {
    pub fn new(response: FreeBusyResponse) -> Self {
        Self { response }
    }
}

impl FreeBusySource for StaticFreeBusy {
    /// Returns only the requested calendars; any the fixture doesn't know
    /// stay absent.
    fn free_busy(&self, request: &FreeBusyRequest) -> Result<FreeBusyResponse> {
        let mut response = FreeBusyResponse::new();
        for id in &request.calendar_ids {
            if let Some(busy) = self.response.get(id) {
                response.insert(id.clone(), busy.clone());
            }
        }
        Ok(response)
    }
}
