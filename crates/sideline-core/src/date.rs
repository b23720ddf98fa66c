//! Canonical date parsing and formatting.
//!
//! Every record in the pipeline carries its date as a display string in the
//! canonical `"Mon D, YYYY"` form (e.g. `"Jun 14, 2023"`). This module is the
//! single authority for converting between that form and a millisecond
//! timestamp. Parsing never fails: a string that cannot be interpreted
//! resolves to the current time so the record still sorts somewhere instead
//! of being dropped.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Fixed month table backing the canonical `"Mon D, YYYY"` display form.
const MONTHS_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// Parses a human-readable date string into a millisecond UTC timestamp.
///
/// Accepted forms: `"Jun 14, 2023"`, `"Jun. 14, 2023"`, `"June 14, 2023"`.
/// The month token is matched against the fixed month table after trimming
/// one trailing period. Day must be in `1..=31` and year in `2000..=2100`.
///
/// Any input that fails to parse or validate resolves to the current time.
/// The returned timestamp is always usable for sorting; this function never
/// fails, not even for the empty string.
#[must_use]
pub fn parse_date(input: &str) -> i64 {
    parse_date_opt(input).unwrap_or_else(|| Utc::now().timestamp_millis())
}

/// Formats a millisecond UTC timestamp as the canonical `"Mon D, YYYY"`
/// display string. Out-of-range timestamps format as the current date.
#[must_use]
pub fn format_date(timestamp_ms: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp_ms).unwrap_or_else(Utc::now);
    format!(
        "{} {}, {}",
        MONTHS_ABBR[dt.month0() as usize],
        dt.day(),
        dt.year()
    )
}

/// Returns `true` when two timestamps fall on the same UTC calendar day,
/// ignoring time of day.
#[must_use]
pub fn same_calendar_day(a: i64, b: i64) -> bool {
    let day_a = DateTime::<Utc>::from_timestamp_millis(a).unwrap_or_else(Utc::now);
    let day_b = DateTime::<Utc>::from_timestamp_millis(b).unwrap_or_else(Utc::now);
    day_a.date_naive() == day_b.date_naive()
}

/// Strict parse of the `"Mon D, YYYY"` family. `None` on any violation.
fn parse_date_opt(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (month_token, rest) = trimmed.split_once(' ')?;
    let month = month_number(month_token)?;

    let (day_token, year_token) = rest.split_once(',')?;
    let day: u32 = day_token.trim().parse().ok()?;
    let year: i32 = year_token.trim().parse().ok()?;

    if !(1..=31).contains(&day) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // Re-derive the fields from the constructed date. Rejects inputs the
    // constructor would normalize, e.g. a day overflowing into the next month.
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }

    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Resolves a month token to its 1-based month number.
///
/// Matches the 3-letter abbreviation, the abbreviation with a trailing
/// period, and the full month name. Case-sensitive.
fn month_number(token: &str) -> Option<u32> {
    let token = token.strip_suffix('.').unwrap_or(token);
    MONTHS_ABBR
        .iter()
        .position(|m| *m == token)
        .or_else(|| MONTHS_FULL.iter().position(|m| *m == token))
        .map(|idx| u32::try_from(idx).expect("month index fits u32") + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_date
    // -----------------------------------------------------------------------

    #[test]
    fn parses_abbreviated_month() {
        let ts = parse_date("Jun 14, 2023");
        assert_eq!(format_date(ts), "Jun 14, 2023");
    }

    #[test]
    fn parses_abbreviated_month_with_period() {
        let ts = parse_date("Jun. 14, 2023");
        assert_eq!(format_date(ts), "Jun 14, 2023");
    }

    #[test]
    fn parses_full_month_name() {
        let ts = parse_date("June 14, 2023");
        assert_eq!(format_date(ts), "Jun 14, 2023");
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        let ts = parse_date("  Jun 14, 2023  ");
        assert_eq!(format_date(ts), "Jun 14, 2023");
    }

    #[test]
    fn leading_zero_day_formats_without_zero() {
        let ts = parse_date("Jan 05, 2024");
        assert_eq!(format_date(ts), "Jan 5, 2024");
    }

    #[test]
    fn round_trips_all_months() {
        for (idx, month) in MONTHS_ABBR.iter().enumerate() {
            let input = format!("{month} 14, 2023");
            let ts = parse_date(&input);
            assert_eq!(format_date(ts), input, "month {idx} failed to round-trip");
        }
    }

    #[test]
    fn timestamps_are_non_negative() {
        for input in ["Jun 14, 2023", "", "garbage", "Foo 99, 1850"] {
            assert!(parse_date(input) >= 0, "negative timestamp for {input:?}");
        }
    }

    // -----------------------------------------------------------------------
    // fallback behavior
    // -----------------------------------------------------------------------

    /// The fallback is "now", so a failed parse lands within the window
    /// bracketing the call.
    fn assert_falls_back_to_now(input: &str) {
        let before = Utc::now().timestamp_millis();
        let ts = parse_date(input);
        let after = Utc::now().timestamp_millis();
        assert!(
            ts >= before && ts <= after,
            "expected now-fallback for {input:?}, got {ts}"
        );
    }

    #[test]
    fn empty_string_falls_back_to_now() {
        assert_falls_back_to_now("");
    }

    #[test]
    fn unknown_month_falls_back_to_now() {
        assert_falls_back_to_now("Jnu 14, 2023");
    }

    #[test]
    fn lowercase_month_falls_back_to_now() {
        // Month matching is case-sensitive against the fixed table.
        assert_falls_back_to_now("jun 14, 2023");
    }

    #[test]
    fn day_overflow_falls_back_to_now() {
        // June has 30 days; 31 must not normalize into July 1.
        assert_falls_back_to_now("Jun. 31, 2023");
    }

    #[test]
    fn day_out_of_range_falls_back_to_now() {
        assert_falls_back_to_now("Jun 0, 2023");
        assert_falls_back_to_now("Jun 32, 2023");
    }

    #[test]
    fn year_out_of_range_falls_back_to_now() {
        assert_falls_back_to_now("Jun 14, 1999");
        assert_falls_back_to_now("Jun 14, 2101");
    }

    #[test]
    fn missing_comma_falls_back_to_now() {
        assert_falls_back_to_now("Jun 14 2023");
    }

    #[test]
    fn non_numeric_day_falls_back_to_now() {
        assert_falls_back_to_now("Jun fourteenth, 2023");
    }

    // -----------------------------------------------------------------------
    // same_calendar_day
    // -----------------------------------------------------------------------

    #[test]
    fn same_day_different_formats_match() {
        let a = parse_date("Jan 5, 2024");
        let b = parse_date("Jan 05, 2024");
        assert!(same_calendar_day(a, b));
    }

    #[test]
    fn different_days_do_not_match() {
        let a = parse_date("Jan 5, 2024");
        let b = parse_date("Jan 6, 2024");
        assert!(!same_calendar_day(a, b));
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let midnight = parse_date("Jan 5, 2024");
        let evening = midnight + 19 * 3_600_000;
        assert!(same_calendar_day(midnight, evening));
    }
}
