//! Cron expression inspection.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use cron::Schedule;
use serde::Serialize;
use toolbox_model::{Result, ToolError};

/// Occurrences listed after the next one.
pub const UPCOMING_COUNT: usize = 5;

/// Next, previous and upcoming fire times of a cron schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronReport {
    pub next: DateTime<Utc>,
    pub prev: Option<DateTime<Utc>>,
    pub upcoming: Vec<DateTime<Utc>>,
}

#[derive(Serialize)]
struct CronJson {
    next: String,
    prev: Option<String>,
    upcoming: Vec<String>,
}

/// Parse a 5-field (minute precision) or 6/7-field (seconds, optional year)
/// cron expression.
pub fn parse_schedule(expression: &str) -> Result<Schedule> {
    let expression = expression.trim();
    let fields = expression.split_whitespace().count();
    let normalized = if fields == 5 {
        format!("0 {expression}")
    } else {
        expression.to_string()
    };
    Schedule::from_str(&normalized).map_err(|e| ToolError::validation("Invalid cron expression", e))
}

/// Fire times of `expression` relative to `now`.
pub fn cron_report(expression: &str, now: DateTime<Utc>) -> Result<CronReport> {
    let schedule = parse_schedule(expression)?;
    let upcoming: Vec<DateTime<Utc>> = schedule.after(&now).take(UPCOMING_COUNT).collect();
    let next = *upcoming.first().ok_or_else(|| {
        ToolError::validation("Invalid cron expression", "schedule never fires in the future")
    })?;
    let prev = schedule.after(&now).next_back();
    Ok(CronReport {
        next,
        prev,
        upcoming,
    })
}

/// Cron inspector: next, previous and upcoming times as JSON (UTC).
pub fn cron(input: &str) -> Result<String> {
    let report = cron_report(input, Utc::now())?;
    let iso = |date: &DateTime<Utc>| date.to_rfc3339_opts(SecondsFormat::Secs, true);
    let json = CronJson {
        next: iso(&report.next),
        prev: report.prev.as_ref().map(iso),
        upcoming: report.upcoming.iter().map(iso).collect(),
    };
    serde_json::to_string_pretty(&json).map_err(|e| ToolError::failed("Invalid cron expression", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn every_five_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 2, 30).unwrap();
        let report = cron_report("*/5 * * * *", now).unwrap();
        assert_eq!(report.next, Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 0).unwrap());
        assert_eq!(report.next.minute() % 5, 0);
        assert_eq!(report.prev, Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()));
        assert_eq!(report.upcoming.len(), UPCOMING_COUNT);
        assert!(report.upcoming.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(report.upcoming.iter().all(|t| *t > now && t.minute() % 5 == 0));
    }

    #[test]
    fn json_output_lists_upcoming_times() {
        let output = cron("0 0 * * *").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["upcoming"].as_array().unwrap().len(), UPCOMING_COUNT);
        assert!(value["next"].as_str().unwrap().ends_with("T00:00:00Z"));
    }

    #[test]
    fn invalid_expressions_are_rejected() {
        assert!(
            cron("every tuesday")
                .unwrap_err()
                .to_string()
                .starts_with("Invalid cron expression: ")
        );
    }
}
