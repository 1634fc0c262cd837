//! ISO-8601 parsing, strftime formatting and date arithmetic.
//!
//! Everything is normalised to UTC. Inputs without an offset are taken to
//! be UTC already.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::error::MinterError;

/// Calendar (extended and basic), ordinal and ISO week dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y-%j", "%G-W%V-%u", "%GW%V%u"];

/// Extended and basic times; seconds and fraction optional.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H%M%S%.f", "%H:%M", "%H%M"];

/// `%#z` takes `+hh` as well as `+hh:mm` and `+hhmm`.
const OFFSET_SPECS: &[&str] = &["%:z", "%z", "%#z"];

/// Parses an ISO-8601 date or date-time. Absent or blank input means now.
///
/// Date-only input resolves to midnight. Times without an offset are UTC.
pub fn parse_date(input: Option<&str>) -> Result<DateTime<Utc>, MinterError> {
    let s = match input.map(str::trim) {
        None | Some("") => return Ok(Utc::now()),
        Some(s) => s,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // ISO-8601 allows a comma as the decimal mark.
    let normalised = s.replace(',', ".");
    let parsed = match normalised.split_once(['T', ' ']) {
        Some((date, time)) => parse_calendar_date(date).and_then(|d| parse_time_on(d, time)),
        None => parse_calendar_date(&normalised).map(|d| d.and_time(NaiveTime::MIN).and_utc()),
    };

    parsed.ok_or_else(|| MinterError::DateParse(s.to_string()))
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parses `time` (with optional `Z` or numeric offset) on `date`.
fn parse_time_on(date: NaiveDate, time: &str) -> Option<DateTime<Utc>> {
    let time = match time.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{local}+00:00"),
        None => time.to_string(),
    };
    let stamped = format!("{}T{}", date.format("%Y-%m-%d"), time);

    for time_fmt in TIME_FORMATS {
        for offset in OFFSET_SPECS {
            let fmt = format!("%Y-%m-%dT{time_fmt}{offset}");
            if let Ok(dt) = DateTime::parse_from_str(&stamped, &fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&stamped, &format!("%Y-%m-%dT{time_fmt}")) {
            return Some(dt.and_utc());
        }
    }
    None
}

/// Formats with strftime specifiers. Unknown specifiers are an error.
pub fn format_date(date: &DateTime<Utc>, fmt: &str) -> Result<String, MinterError> {
    let mut out = String::new();
    write!(out, "{}", date.format(fmt)).map_err(|_| MinterError::DateFormat(fmt.to_string()))?;
    Ok(out)
}

pub fn modify_date(date: DateTime<Utc>, delta: TimeDelta) -> Result<DateTime<Utc>, MinterError> {
    date.checked_add_signed(delta).ok_or(MinterError::DateOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn missing_input_is_now() {
        let before = Utc::now();
        let parsed = parse_date(None).unwrap();
        let blank = parse_date(Some("  ")).unwrap();
        let after = Utc::now();

        assert!(before <= parsed && parsed <= after);
        assert!(before <= blank && blank <= after);
    }

    #[test]
    fn parses_zulu_datetime() {
        let parsed = parse_date(Some("2024-03-15T10:20:30Z")).unwrap();
        assert_eq!(parsed, utc(2024, 3, 15, 10, 20, 30));
    }

    #[test]
    fn offset_is_normalised_to_utc() {
        let parsed = parse_date(Some("2024-03-15T12:20:30+02:00")).unwrap();
        assert_eq!(parsed, utc(2024, 3, 15, 10, 20, 30));

        let compact = parse_date(Some("2024-03-15T12:20:30+0200")).unwrap();
        assert_eq!(compact, parsed);
    }

    #[test]
    fn naive_datetime_is_taken_as_utc() {
        assert_eq!(
            parse_date(Some("2024-03-15T10:20:30")).unwrap(),
            utc(2024, 3, 15, 10, 20, 30)
        );
        assert_eq!(
            parse_date(Some("2024-03-15T10:20")).unwrap(),
            utc(2024, 3, 15, 10, 20, 0)
        );
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let parsed = parse_date(Some("2024-03-15T10:20:30.250")).unwrap();
        assert_eq!(parsed.nanosecond(), 250_000_000);
    }

    #[test]
    fn date_only_falls_back_to_midnight() {
        let parsed = parse_date(Some("2024-02-29")).unwrap();
        assert_eq!(parsed, utc(2024, 2, 29, 0, 0, 0));
    }

    #[test]
    fn basic_date_parses() {
        assert_eq!(parse_date(Some("20240315")).unwrap(), utc(2024, 3, 15, 0, 0, 0));
    }

    #[test]
    fn basic_datetime_parses_with_and_without_offset() {
        let expected = utc(2024, 3, 15, 10, 20, 30);
        assert_eq!(parse_date(Some("20240315T102030Z")).unwrap(), expected);
        assert_eq!(parse_date(Some("20240315T102030")).unwrap(), expected);
        assert_eq!(parse_date(Some("20240315T122030+0200")).unwrap(), expected);
        assert_eq!(parse_date(Some("20240315T1020Z")).unwrap(), utc(2024, 3, 15, 10, 20, 0));
    }

    #[test]
    fn hour_only_offset_parses() {
        let parsed = parse_date(Some("2024-03-15T10:20:30+05")).unwrap();
        assert_eq!(parsed, utc(2024, 3, 15, 5, 20, 30));

        let west = parse_date(Some("2024-03-15T10:20:30-03")).unwrap();
        assert_eq!(west, utc(2024, 3, 15, 13, 20, 30));
    }

    #[test]
    fn comma_decimal_mark_parses() {
        let parsed = parse_date(Some("2024-03-15T10:20:30,5Z")).unwrap();
        assert_eq!(parsed.second(), 30);
        assert_eq!(parsed.nanosecond(), 500_000_000);
    }

    #[test]
    fn ordinal_date_parses() {
        assert_eq!(parse_date(Some("2024-075")).unwrap(), utc(2024, 3, 15, 0, 0, 0));
        assert_eq!(
            parse_date(Some("2024-075T10:20:30Z")).unwrap(),
            utc(2024, 3, 15, 10, 20, 30)
        );
    }

    #[test]
    fn week_date_parses() {
        let friday = utc(2024, 3, 15, 0, 0, 0);
        assert_eq!(parse_date(Some("2024-W11-5")).unwrap(), friday);
        assert_eq!(parse_date(Some("2024W115")).unwrap(), friday);
        assert_eq!(parse_date(Some("2024-W11-5T10:20")).unwrap(), utc(2024, 3, 15, 10, 20, 0));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        for input in [
            "yesterday",
            "2024-13-01",
            "2023-02-29",
            "15/03/2024",
            "2024-03-15T25:00",
            "2024-W54-1",
            "2023-366",
            "2024-03-15T",
        ] {
            let result = parse_date(Some(input));
            assert!(matches!(result, Err(MinterError::DateParse(_))), "{input} parsed");
        }
    }

    #[test]
    fn format_then_parse_round_trips_at_format_resolution() {
        let original = parse_date(Some("2024-03-15T10:20:30.999Z")).unwrap();

        let seconds = format_date(&original, "%Y-%m-%dT%H:%M:%S").unwrap();
        let reparsed = parse_date(Some(&seconds)).unwrap();
        assert_eq!(reparsed, original.with_nanosecond(0).unwrap());

        let day = format_date(&original, "%Y-%m-%d").unwrap();
        let reparsed = parse_date(Some(&day)).unwrap();
        assert_eq!(reparsed.date_naive(), original.date_naive());
        assert_eq!(reparsed.hour(), 0);
    }

    #[test]
    fn formats_with_strftime() {
        let date = utc(2024, 3, 5, 7, 8, 9);
        assert_eq!(format_date(&date, "%d/%m/%Y %H:%M").unwrap(), "05/03/2024 07:08");
        assert_eq!(format_date(&date, "").unwrap(), "");
    }

    #[test]
    fn invalid_format_is_an_error_not_a_panic() {
        let result = format_date(&utc(2024, 1, 1, 0, 0, 0), "%Q");
        assert!(matches!(result, Err(MinterError::DateFormat(_))));
    }

    #[test]
    fn modify_date_adds_and_subtracts() {
        let date = utc(2024, 2, 28, 12, 0, 0);

        let next = modify_date(date, TimeDelta::days(1)).unwrap();
        assert_eq!((next.month(), next.day()), (2, 29));

        let earlier = modify_date(date, TimeDelta::seconds(-3600)).unwrap();
        assert_eq!(earlier.hour(), 11);
    }

    #[test]
    fn modify_date_overflow_is_an_error() {
        let result = modify_date(DateTime::<Utc>::MAX_UTC, TimeDelta::days(1));
        assert!(matches!(result, Err(MinterError::DateOverflow)));
    }
}
