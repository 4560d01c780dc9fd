//! Typed search configuration with documented defaults.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{Result as SlotResult, SlotError, ValidationError};

pub const DEFAULT_START_HOUR: u32 = 9;
pub const DEFAULT_END_HOUR: u32 = 17;
pub const DEFAULT_STEP_MINUTES: u32 = 30;
pub const DEFAULT_DISPLAY_CAP: usize = 10;

/// Daily working hours in the query's time zone, on the hour.
///
/// `end_hour = 24` means the following local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

impl WorkingHours {
    /// Build validated working hours.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidWorkingHours` unless
    /// `0 <= start_hour < end_hour <= 24`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        let hours = Self {
            start_hour,
            end_hour,
        };
        hours.validate()?;
        Ok(hours)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(ValidationError::InvalidWorkingHours {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        Ok(())
    }
}

/// Scan and reporting knobs shared by every query a host runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Distance between candidate slot starts. Independent of the meeting
    /// duration.
    pub step_minutes: u32,
    /// Number of slots reported verbatim; the rest are counted.
    pub display_cap: usize,
    pub dst_policy: DstPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
            display_cap: DEFAULT_DISPLAY_CAP,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.step_minutes == 0 {
            return Err(ValidationError::NonPositiveStep);
        }
        Ok(())
    }
}

/// Parse an IANA timezone name (e.g. "America/New_York").
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> SlotResult<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}
