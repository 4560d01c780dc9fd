//! Walk working windows at a fixed step and keep the conflict-free slots.
//!
//! Candidate starts are `window_start + k * step` for every `k` where the slot
//! still ends within the window. A candidate conflicts with a busy interval
//! only on strict overlap, so a slot that starts exactly when a busy period
//! ends (or ends exactly when one starts) is free. A slot that would end past
//! the largest representable datetime is never a candidate.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::busy::BusySet;
use crate::error::{Result, ValidationError};
use crate::interval::Interval;
use crate::window::WorkingWindow;

/// A fixed-duration slot in the query's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl CandidateSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Emit every free candidate slot across `windows`, chronologically.
///
/// # Errors
/// Returns a validation error when `duration_minutes` or `step_minutes` is zero.
pub fn scan_free_slots<I>(
    windows: I,
    busy: &BusySet,
    duration_minutes: u32,
    step_minutes: u32,
) -> Result<Vec<CandidateSlot>>
where
    I: IntoIterator<Item = WorkingWindow>,
{
    if duration_minutes == 0 {
        return Err(ValidationError::NonPositiveDuration.into());
    }
    if step_minutes == 0 {
        return Err(ValidationError::NonPositiveStep.into());
    }

    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(step_minutes));

    let mut free = Vec::new();
    let mut windows_scanned = 0usize;
    let mut candidates_tested = 0usize;

    for window in windows {
        windows_scanned += 1;
        let mut cursor = window.window_start;
        while let Some(slot_end) = cursor.checked_add_signed(duration) {
            if slot_end > window.window_end {
                break;
            }
            candidates_tested += 1;

            let candidate =
                Interval::new(cursor.with_timezone(&Utc), slot_end.with_timezone(&Utc))?;
            if !busy.conflicts_with(&candidate) {
                free.push(CandidateSlot {
                    start: cursor,
                    end: slot_end,
                });
            }

            match cursor.checked_add_signed(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    debug!(
        windows = windows_scanned,
        candidates = candidates_tested,
        free = free.len(),
        "scanned working windows"
    );

    Ok(free)
}
