//! Half-open time ranges.
//!
//! An [`Interval`] covers `[start, end)`. Two intervals overlap when
//! `a.start < b.end && b.start < a.end`, so intervals that merely touch at an
//! endpoint do NOT overlap.

use chrono::{DateTime, Utc};

use crate::error::{Result, SlotError};

/// A non-empty half-open range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting zero-length and inverted ranges.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict overlap: touching endpoints are not an overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Push `end` out to `end.max(self.end)`. The result is never shorter.
    pub(crate) fn extend_to(self, end: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.max(end),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
