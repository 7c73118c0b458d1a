//! UNIX timestamp and date string conversion.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use toolbox_model::{Result, ToolError};

const INVALID_TIMESTAMP: &str = "Please enter a UNIX timestamp or a valid date string";

/// Convert a UNIX timestamp (10 digits = seconds, otherwise milliseconds),
/// a date string or `now` into every common representation.
pub fn timestamp(input: &str) -> Result<String> {
    timestamp_at(input, Utc::now())
}

/// [`timestamp`] with an explicit clock, for `now`.
pub fn timestamp_at(input: &str, now: DateTime<Utc>) -> Result<String> {
    let date = parse_instant(input.trim(), now)
        .ok_or_else(|| ToolError::validation("Invalid input", INVALID_TIMESTAMP))?;
    Ok(describe(date))
}

fn parse_instant(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if input.eq_ignore_ascii_case("now") {
        return Some(now);
    }

    let digits = input.strip_prefix('-').unwrap_or(input);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let value: i64 = input.parse().ok()?;
        let millis = if input.len() == 10 {
            value.checked_mul(1000)?
        } else {
            value
        };
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date.with_timezone(&Utc));
    }
    // Date-only strings are UTC midnight; date-times without an offset are
    // local time.
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }
    None
}

fn describe(date: DateTime<Utc>) -> String {
    let millis = date.timestamp_millis();
    let local = date.with_timezone(&Local);
    format!(
        "Date: {}\nUNIX (seconds): {}\nUNIX (milliseconds): {}\nISO: {}\nUTC: {}",
        local.format("%Y-%m-%d %H:%M:%S %:z"),
        millis.div_euclid(1000),
        millis,
        date.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        date.format("%a, %d %b %Y %H:%M:%S GMT"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_lines(output: &str) -> Vec<&str> {
        // Skip the local-time line, which depends on the host zone.
        output.lines().skip(1).collect()
    }

    #[test]
    fn ten_digits_are_seconds() {
        let output = timestamp("1640995200").unwrap();
        assert_eq!(
            utc_lines(&output),
            [
                "UNIX (seconds): 1640995200",
                "UNIX (milliseconds): 1640995200000",
                "ISO: 2022-01-01T00:00:00.000Z",
                "UTC: Sat, 01 Jan 2022 00:00:00 GMT",
            ]
        );
    }

    #[test]
    fn other_lengths_are_milliseconds() {
        let output = timestamp("1640995200123").unwrap();
        assert!(output.contains("ISO: 2022-01-01T00:00:00.123Z"));
        assert!(output.contains("UNIX (seconds): 1640995200\n"));
    }

    #[test]
    fn date_strings_and_now() {
        assert!(timestamp("2022-01-01").unwrap().contains("UNIX (seconds): 1640995200\n"));
        assert!(
            timestamp("2022-01-01T12:00:00+02:00")
                .unwrap()
                .contains("ISO: 2022-01-01T10:00:00.000Z")
        );
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(timestamp_at("now", now).unwrap().contains("UNIX (seconds): 1700000000\n"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            timestamp("yesterday-ish").unwrap_err().to_string(),
            "Invalid input: Please enter a UNIX timestamp or a valid date string"
        );
    }
}
