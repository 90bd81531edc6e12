//! Date references accepted by `--date` arguments

use crate::error::{ClinicError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A user-supplied date that is resolved against the local "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateReference {
    Today,
    Yesterday,
    Tomorrow,
    /// Most recent occurrence of a weekday, today included
    ThisOrLast(Weekday),
    /// Occurrence strictly before today
    Last(Weekday),
    /// Occurrence strictly after today
    Next(Weekday),
    Exact(NaiveDate),
}

impl DateReference {
    /// Parse a date reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        let invalid = || ClinicError::InvalidDateReference(input.to_string());

        match normalized.as_str() {
            "today" | "now" => return Ok(DateReference::Today),
            "yesterday" => return Ok(DateReference::Yesterday),
            "tomorrow" => return Ok(DateReference::Tomorrow),
            _ => {}
        }

        if let Some(rest) = normalized.strip_prefix("last ") {
            return parse_weekday(rest).map(DateReference::Last).ok_or_else(invalid);
        }
        if let Some(rest) = normalized.strip_prefix("next ") {
            return parse_weekday(rest).map(DateReference::Next).ok_or_else(invalid);
        }
        if let Some(day) = parse_weekday(&normalized) {
            return Ok(DateReference::ThisOrLast(day));
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .map(DateReference::Exact)
            .map_err(|_| invalid())
    }

    /// Resolve against the given base date
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match *self {
            DateReference::Today => today,
            DateReference::Yesterday => today - Duration::days(1),
            DateReference::Tomorrow => today + Duration::days(1),
            DateReference::ThisOrLast(day) => today - Duration::days(days_back(today, day)),
            DateReference::Last(day) => {
                let back = match days_back(today, day) {
                    0 => 7,
                    n => n,
                };
                today - Duration::days(back)
            }
            DateReference::Next(day) => {
                let forward = match days_forward(today, day) {
                    0 => 7,
                    n => n,
                };
                today + Duration::days(forward)
            }
            DateReference::Exact(date) => date,
        }
    }
}

/// Parse an optional reference, falling back to `today`
pub fn resolve_or_today(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match input {
        Some(raw) => Ok(DateReference::parse(raw)?.resolve(today)),
        None => Ok(today),
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    // chrono accepts "mon" as well, but abbreviations collide with other words
    if name.len() < 6 {
        return None;
    }
    name.parse::<Weekday>().ok()
}

fn days_back(from: NaiveDate, target: Weekday) -> i64 {
    let from = from.weekday().num_days_from_monday() as i64;
    let target = target.num_days_from_monday() as i64;
    (from - target).rem_euclid(7)
}

fn days_forward(from: NaiveDate, target: Weekday) -> i64 {
    let from = from.weekday().num_days_from_monday() as i64;
    let target = target.num_days_from_monday() as i64;
    (target - from).rem_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(DateReference::parse("today").unwrap(), DateReference::Today);
        assert_eq!(DateReference::parse(" NOW ").unwrap(), DateReference::Today);
        assert_eq!(
            DateReference::parse("yesterday").unwrap(),
            DateReference::Yesterday
        );
        assert_eq!(
            DateReference::parse("Tomorrow").unwrap(),
            DateReference::Tomorrow
        );
    }

    #[test]
    fn test_parse_weekdays() {
        assert_eq!(
            DateReference::parse("friday").unwrap(),
            DateReference::ThisOrLast(Weekday::Fri)
        );
        assert_eq!(
            DateReference::parse("last monday").unwrap(),
            DateReference::Last(Weekday::Mon)
        );
        assert_eq!(
            DateReference::parse("next sunday").unwrap(),
            DateReference::Next(Weekday::Sun)
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            DateReference::parse("2025-01-17").unwrap(),
            DateReference::Exact(d(2025, 1, 17))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateReference::parse("someday").is_err());
        assert!(DateReference::parse("mon").is_err());
        assert!(DateReference::parse("2025-02-30").is_err());
        assert!(DateReference::parse("17-01-2025").is_err());
        assert!(DateReference::parse("last week").is_err());
    }

    #[test]
    fn test_resolve_relative_days() {
        let base = d(2025, 1, 17);
        assert_eq!(DateReference::Today.resolve(base), base);
        assert_eq!(DateReference::Yesterday.resolve(base), d(2025, 1, 16));
        assert_eq!(DateReference::Tomorrow.resolve(base), d(2025, 1, 18));
    }

    #[test]
    fn test_resolve_weekdays() {
        // Friday
        let base = d(2025, 1, 17);
        assert_eq!(DateReference::ThisOrLast(Weekday::Fri).resolve(base), base);
        assert_eq!(
            DateReference::ThisOrLast(Weekday::Mon).resolve(base),
            d(2025, 1, 13)
        );
        assert_eq!(DateReference::Last(Weekday::Fri).resolve(base), d(2025, 1, 10));
        assert_eq!(DateReference::Next(Weekday::Fri).resolve(base), d(2025, 1, 24));
        assert_eq!(DateReference::Next(Weekday::Mon).resolve(base), d(2025, 1, 20));
        assert_eq!(DateReference::Last(Weekday::Sat).resolve(base), d(2025, 1, 11));
    }

    #[test]
    fn test_resolve_or_today() {
        let base = d(2026, 10, 17);
        assert_eq!(resolve_or_today(None, base).unwrap(), base);
        assert_eq!(
            resolve_or_today(Some("2026-10-01"), base).unwrap(),
            d(2026, 10, 1)
        );
        assert!(resolve_or_today(Some("nope"), base).is_err());
    }
}
