//! DST transition policies for working-window boundaries.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Far enough back that the wall clock is before any gap containing the
/// local time, for every real UTC offset and a gap of up to a day.
const LOOKBACK_HOURS: i64 = 48;

/// Policy for window boundaries that fall in a DST gap (spring forward).
///
/// Ambiguous local times (fall back) always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop the whole day's window when either boundary falls in the gap
    Skip,
    /// Move the boundary forward by the length of the gap
    #[default]
    ShiftForward,
}

impl DstPolicy {
    /// Resolve a local wall-clock time in `tz` to an instant.
    ///
    /// Returns `None` only under [`DstPolicy::Skip`] for a nonexistent time.
    pub fn localize(self, tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => match self {
                DstPolicy::Skip => None,
                DstPolicy::ShiftForward => shift_past_gap(tz, local),
            },
        }
    }
}

/// The instant a local day begins in `tz`. A midnight swallowed by a DST gap
/// resolves to the end of the gap.
pub fn local_midnight(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let local = day.and_time(NaiveTime::MIN);
    DstPolicy::ShiftForward
        .localize(tz, local)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

/// Interpret a nonexistent `local` with the UTC offset in force before the
/// gap. The result lies past the transition and is moved forward by the gap
/// length, so a boundary at the start of the gap lands exactly on its end.
fn shift_past_gap(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    let before_gap = local.checked_sub_signed(Duration::hours(LOOKBACK_HOURS))?;
    let offset_before = tz.offset_from_utc_datetime(&before_gap).fix();
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(
        offset_before.local_minus_utc(),
    )))?;
    Some(tz.from_utc_datetime(&utc))
}
