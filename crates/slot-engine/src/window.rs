//! Per-day working windows across a date range.
//!
//! One window per weekday in `[first_day, first_day + days)`, bounded by the
//! configured working hours in the query's time zone. Saturdays and Sundays
//! produce nothing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::config::WorkingHours;
use crate::dst::DstPolicy;
use crate::error::Result;

/// The schedulable part of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    pub day: NaiveDate,
    pub window_start: DateTime<Tz>,
    pub window_end: DateTime<Tz>,
}

impl WorkingWindow {
    pub fn duration_minutes(&self) -> i64 {
        (self.window_end - self.window_start).num_minutes()
    }
}

/// Lazy iterator over working windows. Cloning restarts from the same point.
#[derive(Debug, Clone)]
pub struct WorkingWindows {
    next_day: NaiveDate,
    days_left: u32,
    hours: WorkingHours,
    tz: Tz,
    policy: DstPolicy,
}

/// Enumerate working windows for `days` calendar days starting at `first_day`.
///
/// # Errors
/// Returns `ValidationError::InvalidWorkingHours` unless
/// `0 <= start_hour < end_hour <= 24`.
pub fn working_windows(
    first_day: NaiveDate,
    days: u32,
    hours: WorkingHours,
    tz: Tz,
    policy: DstPolicy,
) -> Result<WorkingWindows> {
    hours.validate()?;
    Ok(WorkingWindows {
        next_day: first_day,
        days_left: days,
        hours,
        tz,
        policy,
    })
}

/// Monday=0 .. Sunday=6; 5 and 6 are the weekend.
pub fn is_weekend(day: NaiveDate) -> bool {
    day.weekday().num_days_from_monday() >= 5
}

impl Iterator for WorkingWindows {
    type Item = WorkingWindow;

    fn next(&mut self) -> Option<WorkingWindow> {
        while self.days_left > 0 {
            let day = self.next_day;
            self.days_left -= 1;
            match day.succ_opt() {
                Some(next) => self.next_day = next,
                None => self.days_left = 0,
            }

            if is_weekend(day) {
                continue;
            }
            if let Some(window) = window_for_day(day, self.hours, &self.tz, self.policy) {
                return Some(window);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.days_left as usize))
    }
}

fn window_for_day(
    day: NaiveDate,
    hours: WorkingHours,
    tz: &Tz,
    policy: DstPolicy,
) -> Option<WorkingWindow> {
    let start_local = local_hour(day, hours.start_hour)?;
    let end_local = local_hour(day, hours.end_hour)?;

    let window_start = policy.localize(tz, start_local)?;
    let window_end = policy.localize(tz, end_local)?;
    if window_start >= window_end {
        return None;
    }

    Some(WorkingWindow {
        day,
        window_start,
        window_end,
    })
}

/// `hour` o'clock on `day`; hour 24 is the next day's midnight.
fn local_hour(day: NaiveDate, hour: u32) -> Option<NaiveDateTime> {
    if hour == 24 {
        day.succ_opt()?.and_hms_opt(0, 0, 0)
    } else {
        day.and_hms_opt(hour, 0, 0)
    }
}
