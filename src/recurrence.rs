//! Recurring-donation schedule arithmetic.
//!
//! The service describes a donation's recurrence with a free-text phrase
//! like `"every 1 month"`. That format is not formally specified upstream,
//! so parsing is strict: anything that does not match the expected
//! three-token shape fails with [`AnError::MalformedRecurrence`] rather
//! than guessing, letting callers detect bad upstream data instead of
//! silently computing wrong schedules.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnError, Result};

/// Canonical recurrence units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
    Year,
}

/// A normalized recurrence interval: `count` steps of `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceInterval {
    pub unit: RecurrenceUnit,
    pub count: u32,
}

impl RecurrenceInterval {
    /// Parse a recurrence period phrase of the form `"every <N> <unit>"`.
    ///
    /// The first token is ignored, the second must be a positive integer,
    /// and the third a unit name (day/week/month/year, singular or plural,
    /// case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AnError::MalformedRecurrence`] carrying the offending
    /// string when the phrase has fewer than three tokens, a non-positive
    /// or non-numeric count, or an unknown unit.
    pub fn parse(period: &str) -> Result<Self> {
        let malformed = |reason| AnError::MalformedRecurrence {
            period: period.to_string(),
            reason,
        };

        let tokens: Vec<&str> = period.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(malformed("expected 'every <count> <unit>'"));
        }

        let count: u32 = tokens[1]
            .parse()
            .map_err(|_| malformed("count is not a positive integer"))?;
        if count == 0 {
            return Err(malformed("count must be at least 1"));
        }

        let unit = match tokens[2].to_lowercase().trim_end_matches('s') {
            "day" => RecurrenceUnit::Day,
            "week" => RecurrenceUnit::Week,
            "month" => RecurrenceUnit::Month,
            "year" => RecurrenceUnit::Year,
            _ => return Err(malformed("unknown unit")),
        };

        Ok(Self { unit, count })
    }

    /// Project forward from `origin` to the first occurrence strictly
    /// after `now`.
    ///
    /// The result is the smallest `origin + k * interval` (whole intervals,
    /// `k >= 1`) that exceeds `now`; `origin == now` therefore yields one
    /// full interval in the future. Month and year steps use calendar
    /// arithmetic: each step clamps to the last valid day of the target
    /// month, and clamping carries forward step to step (Jan 31 -> Feb 28
    /// -> Mar 28).
    pub fn next_after(&self, origin: DateTime<Utc>, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        match self.unit {
            RecurrenceUnit::Day => next_fixed(origin, now, i64::from(self.count)),
            RecurrenceUnit::Week => next_fixed(origin, now, i64::from(self.count) * 7),
            RecurrenceUnit::Month => next_calendar(origin, now, self.count),
            RecurrenceUnit::Year => next_calendar(origin, now, self.count * 12),
        }
    }
}

impl std::fmt::Display for RecurrenceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

fn out_of_range() -> AnError {
    AnError::DataContract("next occurrence is outside the representable date range".to_string())
}

/// Closed-form projection for fixed-length intervals (days, weeks).
fn next_fixed(origin: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    let step_secs = days * 86_400;
    let elapsed_secs = (now - origin).num_seconds();
    let intervals = if elapsed_secs < 0 {
        0
    } else {
        elapsed_secs / step_secs
    };
    origin
        .checked_add_signed(Duration::seconds(step_secs * (intervals + 1)))
        .ok_or_else(out_of_range)
}

/// Calendar-aware projection for month-based intervals (months, years).
///
/// When the origin's day-of-month is 28 or less no step can clamp, so a
/// closed-form jump covers most of the distance at once; otherwise the walk
/// is a plain bounded loop so that clamping accumulates exactly as it would
/// by adding one interval at a time.
fn next_calendar(origin: DateTime<Utc>, now: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    let step = Months::new(months);

    let mut next = origin;
    if origin.day() <= 28 && now > origin {
        let elapsed_months =
            (now.year() - origin.year()) * 12 + (now.month() as i32 - origin.month() as i32);
        // Stay at least one step short of `now` so the loop below still
        // performs the mandatory final interval.
        if elapsed_months > 1 {
            let jump = u32::try_from(elapsed_months - 1).unwrap_or(0) / months * months;
            next = origin
                .checked_add_months(Months::new(jump))
                .ok_or_else(out_of_range)?;
        }
    }

    loop {
        next = next.checked_add_months(step).ok_or_else(out_of_range)?;
        if next > now {
            return Ok(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_monthly() {
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        assert_eq!(interval.unit, RecurrenceUnit::Month);
        assert_eq!(interval.count, 1);
    }

    #[test]
    fn test_parse_biweekly() {
        let interval = RecurrenceInterval::parse("every 2 weeks").unwrap();
        assert_eq!(interval.unit, RecurrenceUnit::Week);
        assert_eq!(interval.count, 2);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let interval = RecurrenceInterval::parse("Every 3 MONTHS").unwrap();
        assert_eq!(interval.unit, RecurrenceUnit::Month);
        assert_eq!(interval.count, 3);
    }

    #[test]
    fn test_parse_rejects_single_word() {
        let err = RecurrenceInterval::parse("monthly").unwrap_err();
        match err {
            AnError::MalformedRecurrence { period, .. } => assert_eq!(period, "monthly"),
            other => panic!("expected MalformedRecurrence, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_count() {
        assert!(RecurrenceInterval::parse("every one month").is_err());
        assert!(RecurrenceInterval::parse("every 0 months").is_err());
        assert!(RecurrenceInterval::parse("every -2 weeks").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        assert!(RecurrenceInterval::parse("every 2 fortnights").is_err());
    }

    #[test]
    fn test_next_monthly_after_now() {
        // First monthly occurrence after Oct 15 for a donation created Aug 14.
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        let origin = utc(2017, 8, 14, 0, 0, 0);
        let now = utc(2017, 10, 15, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2017, 11, 14, 0, 0, 0)
        );
    }

    #[test]
    fn test_next_is_strictly_future_on_exact_boundary() {
        let interval = RecurrenceInterval::parse("every 1 week").unwrap();
        let origin = utc(2017, 8, 14, 0, 0, 0);
        // `now` lands exactly on an occurrence; the result must be the one after.
        let now = utc(2017, 8, 28, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2017, 9, 4, 0, 0, 0)
        );
    }

    #[test]
    fn test_origin_equal_to_now_advances_one_interval() {
        let interval = RecurrenceInterval::parse("every 2 days").unwrap();
        let origin = utc(2020, 1, 1, 12, 0, 0);
        assert_eq!(
            interval.next_after(origin, origin).unwrap(),
            utc(2020, 1, 3, 12, 0, 0)
        );
    }

    #[test]
    fn test_origin_in_the_future_still_adds_an_interval() {
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        let origin = utc(2020, 6, 1, 0, 0, 0);
        let now = utc(2020, 1, 1, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2020, 7, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_month_end_clamping_carries_forward() {
        // Jan 31 -> Feb 28 -> Mar 28: the clamp persists on later steps.
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        let origin = utc(2021, 1, 31, 9, 0, 0);
        let now = utc(2021, 3, 1, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2021, 3, 28, 9, 0, 0)
        );
    }

    #[test]
    fn test_leap_year_february() {
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        let origin = utc(2020, 1, 31, 0, 0, 0);
        let now = utc(2020, 2, 1, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2020, 2, 29, 0, 0, 0)
        );
    }

    #[test]
    fn test_yearly_step() {
        let interval = RecurrenceInterval::parse("every 1 year").unwrap();
        let origin = utc(2015, 3, 10, 8, 30, 0);
        let now = utc(2017, 3, 10, 8, 30, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2018, 3, 10, 8, 30, 0)
        );
    }

    #[test]
    fn test_distant_origin_small_step() {
        // A weekly donation created decades ago must still resolve quickly
        // and land within one step of `now`.
        let interval = RecurrenceInterval::parse("every 1 week").unwrap();
        let origin = utc(1980, 1, 7, 0, 0, 0);
        let now = utc(2024, 6, 1, 0, 0, 0);
        let next = interval.next_after(origin, now).unwrap();
        assert!(next > now);
        assert!(next - now <= Duration::days(7));
        // Still on the weekly grid anchored at the origin.
        assert_eq!((next - origin).num_seconds() % (7 * 86_400), 0);
    }

    #[test]
    fn test_distant_origin_monthly() {
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        let origin = utc(1990, 5, 14, 10, 0, 0);
        let now = utc(2024, 2, 1, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2024, 2, 14, 10, 0, 0)
        );
    }

    #[test]
    fn test_quarterly_alignment() {
        // Steps are anchored at the origin, not at `now`.
        let interval = RecurrenceInterval::parse("every 3 months").unwrap();
        let origin = utc(2023, 1, 15, 0, 0, 0);
        let now = utc(2023, 5, 1, 0, 0, 0);
        assert_eq!(
            interval.next_after(origin, now).unwrap(),
            utc(2023, 7, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_idempotent_advance() {
        // Feeding the previous result back as `now` advances by exactly one
        // occurrence each time.
        let interval = RecurrenceInterval::parse("every 1 month").unwrap();
        let origin = utc(2017, 8, 14, 0, 0, 0);
        let mut now = utc(2017, 10, 15, 0, 0, 0);

        let mut occurrences = Vec::new();
        for _ in 0..4 {
            now = interval.next_after(origin, now).unwrap();
            occurrences.push(now);
        }
        assert_eq!(
            occurrences,
            vec![
                utc(2017, 11, 14, 0, 0, 0),
                utc(2017, 12, 14, 0, 0, 0),
                utc(2018, 1, 14, 0, 0, 0),
                utc(2018, 2, 14, 0, 0, 0),
            ]
        );
    }
}
