//! Weekly launch calendar.
//!
//! A launch runs from Monday 00:00:00 to the following Sunday 23:59:59 in the
//! launch time zone. The zone is a fixed UTC offset supplied by configuration;
//! every instant going in or out of this module is UTC.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, Timelike};

use crate::types::Timestamp;

/// Prefix of every generated launch name.
pub const LAUNCH_NAME_PREFIX: &str = "Weekly Launch #";

/// Length of a launch window past its start: 6 days 23:59:59.
pub fn launch_length() -> Duration {
    Duration::days(6) + Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59)
}

/// Number of days from `local` to the Monday that starts the next launch.
///
/// - Monday at exactly 00:00:00 targets the same day.
/// - Any later Monday instant targets the Monday a week ahead.
/// - Sunday targets tomorrow.
/// - Tuesday..Saturday target `8 - weekday` days ahead (Sunday = 0).
pub fn days_until_launch_start(local: &DateTime<FixedOffset>) -> i64 {
    let weekday = i64::from(local.weekday().num_days_from_sunday());
    match weekday {
        1 if local.hour() == 0 && local.minute() == 0 && local.second() == 0 => 0,
        1 => 7,
        0 => 1,
        _ => 8 - weekday,
    }
}

/// Start instant of the launch that should follow `now`.
pub fn next_launch_start(now: Timestamp, offset: FixedOffset) -> Timestamp {
    let local = now.with_timezone(&offset);
    let days = days_until_launch_start(&local);

    let monday = local.date_naive() + Duration::days(days);
    let local_midnight = monday.and_time(NaiveTime::MIN);

    (local_midnight - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

/// End instant (inclusive) of a launch starting at `start`.
pub fn launch_end(start: Timestamp) -> Timestamp {
    start + launch_length()
}

/// Sequence number of a new launch starting at `start`: one more than the
/// number of existing launches that start in the same calendar year.
pub fn launch_number<I>(existing_starts: I, start: Timestamp, offset: FixedOffset) -> usize
where
    I: IntoIterator<Item = Timestamp>,
{
    let year = start.with_timezone(&offset).year();
    let same_year = existing_starts
        .into_iter()
        .filter(|s| s.with_timezone(&offset).year() == year)
        .count();
    same_year + 1
}

/// Display name for the launch with the given sequence number.
pub fn launch_name(number: usize) -> String {
    format!("{LAUNCH_NAME_PREFIX}{number}")
}

/// A planned launch window, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchWindow {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

impl LaunchWindow {
    /// Plan the launch that follows `now`, numbering it against the start
    /// dates of every launch already stored.
    pub fn plan<I>(now: Timestamp, offset: FixedOffset, existing_starts: I) -> Self
    where
        I: IntoIterator<Item = Timestamp>,
    {
        let start_date = next_launch_start(now, offset);
        let number = launch_number(existing_starts, start_date, offset);
        Self {
            name: launch_name(number),
            start_date,
            end_date: launch_end(start_date),
        }
    }
}
