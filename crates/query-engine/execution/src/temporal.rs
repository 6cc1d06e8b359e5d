//! Rendering of the warehouse's epoch-based date and time cells as ISO-8601 text.
//!
//! Dates arrive as days since the Unix epoch, times as seconds since midnight and timestamps as
//! seconds since the epoch, all with an optional fraction of up to nine digits. `TIMESTAMP_TZ`
//! cells carry a second field: the UTC offset in minutes, shifted by 1440.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};

const NANOS_PER_SECOND: i128 = 1_000_000_000;
/// `NaiveDate::from_num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;
const TIMEZONE_OFFSET_BIAS_MINUTES: i32 = 1440;

/// `20380` becomes `2025-10-19`.
pub(crate) fn date(text: &str) -> Option<String> {
    let days = text.parse::<i64>().ok()?;
    let days_from_ce = i32::try_from(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?).ok()?;
    let date = NaiveDate::from_num_days_from_ce_opt(days_from_ce)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// `3723.5` becomes `01:02:03.500000`.
pub(crate) fn time(text: &str) -> Option<String> {
    let (seconds, nanos) = split_epoch(text)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(u32::try_from(seconds).ok()?, nanos)?;
    Some(format!(
        "{}{}",
        time.format("%H:%M:%S"),
        fraction(time.nanosecond())
    ))
}

/// A timestamp without a time zone, e.g. `2025-10-19T00:00:00.123000`.
pub(crate) fn timestamp_ntz(text: &str) -> Option<String> {
    let (seconds, nanos) = split_epoch(text)?;
    let timestamp = DateTime::from_timestamp(seconds, nanos)?.naive_utc();
    Some(format!(
        "{}{}",
        timestamp.format("%Y-%m-%dT%H:%M:%S"),
        fraction(timestamp.nanosecond())
    ))
}

/// An instant, rendered in UTC.
pub(crate) fn timestamp_ltz(text: &str) -> Option<String> {
    let (seconds, nanos) = split_epoch(text)?;
    let timestamp = DateTime::from_timestamp(seconds, nanos)?.fixed_offset();
    Some(with_offset(&timestamp))
}

/// An instant together with the offset it was recorded in.
pub(crate) fn timestamp_tz(text: &str) -> Option<String> {
    let (epoch, offset) = text.trim().split_once(' ')?;
    let minutes = offset.parse::<i32>().ok()? - TIMEZONE_OFFSET_BIAS_MINUTES;
    let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
    let (seconds, nanos) = split_epoch(epoch)?;
    let timestamp = DateTime::from_timestamp(seconds, nanos)?.with_timezone(&offset);
    Some(with_offset(&timestamp))
}

fn with_offset(timestamp: &DateTime<FixedOffset>) -> String {
    format!(
        "{}{}{}",
        timestamp.format("%Y-%m-%dT%H:%M:%S"),
        fraction(timestamp.nanosecond()),
        timestamp.format("%:z")
    )
}

/// Microsecond fraction, omitted when zero.
fn fraction(nanos: u32) -> String {
    match nanos / 1_000 {
        0 => String::new(),
        micros => format!(".{micros:06}"),
    }
}

/// Split `[-]seconds[.fraction]` into whole seconds, rounded towards negative infinity, and the
/// nanoseconds past them.
fn split_epoch(text: &str) -> Option<(i64, u32)> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty()
        || fraction.len() > 9
        || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole = whole.parse::<i128>().ok()?;
    let fraction = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse::<i128>().ok()?
    };
    let mut nanos = whole.checked_mul(NANOS_PER_SECOND)?.checked_add(fraction)?;
    if negative {
        nanos = -nanos;
    }

    let seconds = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).ok()?;
    Some((seconds, subsec))
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn dates_count_days_from_the_epoch() {
        assert_eq!(date("20380").as_deref(), Some("2025-10-19"));
        assert_eq!(date("0").as_deref(), Some("1970-01-01"));
        assert_eq!(date("-1").as_deref(), Some("1969-12-31"));
        assert_eq!(date("yesterday"), None);
    }

    #[test]
    fn times_count_seconds_from_midnight() {
        assert_eq!(time("3723.500000000").as_deref(), Some("01:02:03.500000"));
        assert_eq!(time("0").as_deref(), Some("00:00:00"));
        assert_eq!(time("86400"), None);
    }

    #[test]
    fn timestamps_without_a_zone_have_no_offset() {
        assert_eq!(
            timestamp_ntz("1760832000.123000000").as_deref(),
            Some("2025-10-19T00:00:00.123000")
        );
        assert_eq!(
            timestamp_ntz("1760832000").as_deref(),
            Some("2025-10-19T00:00:00")
        );
    }

    #[test]
    fn local_timestamps_are_rendered_in_utc() {
        assert_eq!(
            timestamp_ltz("1760832000.5").as_deref(),
            Some("2025-10-19T00:00:00.500000+00:00")
        );
    }

    #[test]
    fn zoned_timestamps_apply_their_offset() {
        assert_eq!(
            timestamp_tz("1760832000.123000000 1560").as_deref(),
            Some("2025-10-19T02:00:00.123000+02:00")
        );
        assert_eq!(
            timestamp_tz("1760832000.000000000 1140").as_deref(),
            Some("2025-10-18T19:00:00-05:00")
        );
        assert_eq!(timestamp_tz("1760832000.000000000"), None);
    }

    #[test]
    fn fractions_before_the_epoch_round_down() {
        assert_eq!(split_epoch("-1.500000000"), Some((-2, 500_000_000)));
        assert_eq!(split_epoch("-0.25"), Some((-1, 750_000_000)));
        assert_eq!(split_epoch("12.3"), Some((12, 300_000_000)));
        assert_eq!(split_epoch("1.2.3"), None);
        assert_eq!(split_epoch("-"), None);
    }
}
