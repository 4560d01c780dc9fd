//! Merge busy intervals from many calendars into one sorted disjoint set.
//!
//! Sorts intervals by `(start, end)` and sweeps once, coalescing any interval
//! that starts at or before the running end. Touching intervals DO merge here
//! (`next.start <= current.end`), whereas conflict testing against the merged
//! set uses strict overlap (see [`Interval::overlaps`]). Both rules are relied
//! on by callers and must stay as they are.

use crate::interval::Interval;

/// Sorted, disjoint busy intervals. For every adjacent pair,
/// `prev.end < next.start`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusySet {
    intervals: Vec<Interval>,
}

impl BusySet {
    /// Merge overlapping or adjacent busy intervals.
    ///
    /// Empty input yields an empty set.
    pub fn merge<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        if sorted.is_empty() {
            return Self::default();
        }

        // `Interval` orders by (start, end), which keeps ties deterministic.
        sorted.sort();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            if let Some(last) = merged.last_mut() {
                if next.start() <= last.end() {
                    *last = last.extend_to(next.end());
                    continue;
                }
            }
            merged.push(next);
        }

        Self { intervals: merged }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total busy minutes covered by the set.
    pub fn covered_minutes(&self) -> i64 {
        self.intervals.iter().map(Interval::duration_minutes).sum()
    }

    /// Does `candidate` strictly overlap any busy interval?
    ///
    /// Stops at the first busy interval starting at or after `candidate.end`,
    /// since nothing later can overlap.
    pub fn conflicts_with(&self, candidate: &Interval) -> bool {
        for busy in &self.intervals {
            if busy.start() >= candidate.end() {
                break;
            }
            if busy.overlaps(candidate) {
                return true;
            }
        }
        false
    }
}

impl<'a> IntoIterator for &'a BusySet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
