//! Multi-calendar availability: access policy, merge, scan, and reporting.
//!
//! A query succeeds only when every requested calendar could be read. If the
//! primary calendar is unreadable the query fails outright; if any other
//! participant's calendar is unreadable the query fails naming exactly those
//! calendars. Partial availability computed from the readable subset is never
//! returned.
//!
//! A query that finds no free slot is not an error: it yields
//! [`AvailabilityResult::NoFreeSlots`].

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::busy::BusySet;
use crate::config::{SearchConfig, WorkingHours};
use crate::dst::local_midnight;
use crate::error::{Result, SlotError, ValidationError};
use crate::interval::Interval;
use crate::scanner::{scan_free_slots, CandidateSlot};
use crate::source::{FreeBusyRequest, FreeBusyResponse, FreeBusySource, PRIMARY_CALENDAR};
use crate::window::working_windows;

pub const DEFAULT_DAYS_TO_CHECK: u32 = 5;
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// A request for free slots shared by the primary calendar and `calendar_ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// Any instant on the first day to check. Normalized to local midnight
    /// in `timezone`.
    pub range_start: DateTime<Utc>,
    pub days_to_check: u32,
    pub duration_minutes: u32,
    pub working_hours: WorkingHours,
    pub timezone: Tz,
    /// Other participants. The primary calendar is implied.
    pub calendar_ids: Vec<String>,
}

impl AvailabilityQuery {
    pub fn new(range_start: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            range_start,
            days_to_check: DEFAULT_DAYS_TO_CHECK,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            working_hours: WorkingHours::default(),
            timezone,
            calendar_ids: Vec::new(),
        }
    }

    pub fn with_days(mut self, days_to_check: u32) -> Self {
        self.days_to_check = days_to_check;
        self
    }

    pub fn with_duration_minutes(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    pub fn with_working_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }

    pub fn with_calendar_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calendar_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// # Errors
    /// Fails on a zero duration, zero days, or malformed working hours.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.duration_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if self.days_to_check == 0 {
            return Err(ValidationError::NoDays);
        }
        self.working_hours.validate()
    }

    /// The local calendar date `range_start` falls on.
    pub fn first_day(&self) -> NaiveDate {
        self.range_start.with_timezone(&self.timezone).date_naive()
    }

    /// Participants other than the primary calendar, deduplicated, in the
    /// order given.
    pub fn participants(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::with_capacity(self.calendar_ids.len());
        for id in &self.calendar_ids {
            if id != PRIMARY_CALENDAR && !seen.contains(id) {
                seen.push(id.clone());
            }
        }
        seen
    }

    /// The collaborator request covering `[local midnight, + days)`.
    pub fn free_busy_request(&self) -> FreeBusyRequest {
        let first_day = self.first_day();
        let last_day = first_day
            .checked_add_days(Days::new(u64::from(self.days_to_check)))
            .unwrap_or(NaiveDate::MAX);

        let mut calendar_ids = vec![PRIMARY_CALENDAR.to_string()];
        calendar_ids.extend(self.participants());

        FreeBusyRequest {
            time_min: local_midnight(first_day, &self.timezone),
            time_max: local_midnight(last_day, &self.timezone),
            timezone: self.timezone,
            calendar_ids,
        }
    }
}

/// Free slots in chronological order plus the display cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotListing {
    slots: Vec<CandidateSlot>,
    display_cap: usize,
}

impl SlotListing {
    pub fn slots(&self) -> &[CandidateSlot] {
        &self.slots
    }

    pub fn total(&self) -> usize {
        self.slots.len()
    }

    /// The first `display_cap` slots.
    pub fn shown(&self) -> &[CandidateSlot] {
        &self.slots[..self.slots.len().min(self.display_cap)]
    }

    /// How many slots were found beyond the display cap.
    pub fn remaining(&self) -> usize {
        self.slots.len().saturating_sub(self.display_cap)
    }

    pub fn display_cap(&self) -> usize {
        self.display_cap
    }

    pub fn into_slots(self) -> Vec<CandidateSlot> {
        self.slots
    }
}

/// Outcome of a successful availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityResult {
    Available(SlotListing),
    NoFreeSlots,
}

impl AvailabilityResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, AvailabilityResult::NoFreeSlots)
    }

    pub fn listing(&self) -> Option<&SlotListing> {
        match self {
            AvailabilityResult::Available(listing) => Some(listing),
            AvailabilityResult::NoFreeSlots => None,
        }
    }
}

/// Package scanned slots for reporting. Empty input is `NoFreeSlots`.
pub fn assemble(slots: Vec<CandidateSlot>, display_cap: usize) -> AvailabilityResult {
    if slots.is_empty() {
        return AvailabilityResult::NoFreeSlots;
    }
    AvailabilityResult::Available(SlotListing { slots, display_cap })
}

/// Gather busy intervals for the primary calendar and every participant,
/// enforcing the all-or-nothing access policy.
///
/// # Errors
/// `PrimaryCalendarInaccessible` if the primary calendar is unreadable, else
/// `CalendarAccess` naming every unreadable participant.
pub fn collect_busy(participants: &[String], response: &FreeBusyResponse) -> Result<Vec<Interval>> {
    let Some(primary) = response.busy_for(PRIMARY_CALENDAR) else {
        warn!("primary calendar inaccessible");
        return Err(SlotError::PrimaryCalendarInaccessible);
    };

    let mut busy = primary.to_vec();
    let mut inaccessible = Vec::new();
    for id in participants {
        match response.busy_for(id) {
            Some(intervals) => busy.extend_from_slice(intervals),
            None => inaccessible.push(id.clone()),
        }
    }

    if !inaccessible.is_empty() {
        warn!(calendars = ?inaccessible, "participant calendars inaccessible");
        return Err(SlotError::CalendarAccess(inaccessible));
    }
    Ok(busy)
}

/// Compute availability from an already-fetched free/busy response.
///
/// # Errors
/// Validation errors for a malformed query or config, then access errors per
/// [`collect_busy`]. Both are raised before any merging or scanning.
pub fn availability_from_response(
    query: &AvailabilityQuery,
    config: &SearchConfig,
    response: &FreeBusyResponse,
) -> Result<AvailabilityResult> {
    query.validate()?;
    config.validate()?;

    let busy = collect_busy(&query.participants(), response)?;
    let busy = BusySet::merge(busy);
    debug!(
        busy_periods = busy.len(),
        busy_minutes = busy.covered_minutes(),
        "merged busy intervals"
    );

    let windows = working_windows(
        query.first_day(),
        query.days_to_check,
        query.working_hours,
        query.timezone,
        config.dst_policy,
    )?;
    let slots = scan_free_slots(windows, &busy, query.duration_minutes, config.step_minutes)?;

    Ok(assemble(slots, config.display_cap))
}

/// Ask `source` for busy data, then compute availability.
///
/// # Errors
/// Validation errors before the source is called; otherwise whatever the
/// source or [`availability_from_response`] returns.
pub fn find_availability<S: FreeBusySource>(
    query: &AvailabilityQuery,
    config: &SearchConfig,
    source: &S,
) -> Result<AvailabilityResult> {
    query.validate()?;
    config.validate()?;

    let request = query.free_busy_request();
    debug!(
        calendars = request.calendar_ids.len(),
        time_min = %request.time_min,
        time_max = %request.time_max,
        "requesting free/busy"
    );
    let response = source.free_busy(&request)?;
    availability_from_response(query, config, &response)
}
