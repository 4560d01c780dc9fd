//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid query: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The caller's own calendar could not be resolved. Checked before any
    /// other calendar.
    #[error("Could not access the primary calendar")]
    PrimaryCalendarInaccessible,

    /// One or more requested calendars could not be resolved. Carries exactly
    /// the offending identifiers, in request order.
    #[error("Could not access calendars for: {}", .0.join(", "))]
    CalendarAccess(Vec<String>),

    #[error("Free/busy source error: {0}")]
    Source(String),
}

impl SlotError {
    /// True for both primary and participant calendar access failures.
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            SlotError::PrimaryCalendarInaccessible | SlotError::CalendarAccess(_)
        )
    }
}

/// A malformed availability query. Raised before any merging or scanning.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duration must be greater than zero minutes")]
    NonPositiveDuration,

    #[error("at least one day must be checked")]
    NoDays,

    #[error("working hours {start_hour}..{end_hour} are invalid (need 0 <= start < end <= 24)")]
    InvalidWorkingHours { start_hour: u32, end_hour: u32 },

    #[error("step must be greater than zero minutes")]
    NonPositiveStep,
}

pub type Result<T> = std::result::Result<T, SlotError>;
