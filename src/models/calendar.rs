//! Working-day calendar.
//!
//! Defines which dates count as working days: a set of working weekdays
//! (Monday through Friday by default) minus explicit blackout dates
//! (holidays, delivery waits, building-access restrictions).
//!
//! All date arithmetic advances strictly forward and is deterministic:
//! the same calendar and inputs always produce the same dates, and no
//! scheduled date ever lands on a non-working day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Calendar of working days.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use renoplan::models::WorkingCalendar;
///
/// let cal = WorkingCalendar::new()
///     .with_blackout(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
///
/// // 2026-01-01 is a Thursday but blacked out; Friday is the next slot.
/// let next = cal.next_working_day(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert_eq!(next, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingCalendar {
    /// Weekdays on which work happens.
    pub working_weekdays: Vec<Weekday>,
    /// Dates excluded from work regardless of weekday.
    pub blackout_dates: BTreeSet<NaiveDate>,
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkingCalendar {
    /// Creates a Monday-to-Friday calendar with no blackout dates.
    pub fn new() -> Self {
        Self {
            working_weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            blackout_dates: BTreeSet::new(),
        }
    }

    /// Adds Saturday and Sunday as working days.
    pub fn with_weekend_work(mut self) -> Self {
        for day in [Weekday::Sat, Weekday::Sun] {
            if !self.working_weekdays.contains(&day) {
                self.working_weekdays.push(day);
            }
        }
        self
    }

    /// Adds a single working weekday.
    pub fn with_working_day(mut self, day: Weekday) -> Self {
        if !self.working_weekdays.contains(&day) {
            self.working_weekdays.push(day);
        }
        self
    }

    /// Adds a blackout date.
    pub fn with_blackout(mut self, date: NaiveDate) -> Self {
        self.blackout_dates.insert(date);
        self
    }

    /// Adds multiple blackout dates.
    pub fn with_blackouts(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.blackout_dates.extend(dates);
        self
    }

    /// Whether `date` is a working day.
    ///
    /// An empty weekday list is treated as "every weekday works" so a
    /// misconfigured calendar cannot stall date advancement forever.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.blackout_dates.contains(&date) {
            return false;
        }
        self.working_weekdays.is_empty() || self.working_weekdays.contains(&date.weekday())
    }

    /// First working day at or after `date`.
    pub fn next_working_day(&self, date: NaiveDate) -> NaiveDate {
        let mut d = date;
        while !self.is_working_day(d) {
            d += Duration::days(1);
        }
        d
    }

    /// The working day reached by advancing `offset` working days past
    /// the first working day at or after `from`.
    ///
    /// `offset == 0` yields `next_working_day(from)` itself.
    pub fn offset_to_date(&self, from: NaiveDate, offset: u32) -> NaiveDate {
        let mut d = self.next_working_day(from);
        for _ in 0..offset {
            d = self.next_working_day(d + Duration::days(1));
        }
        d
    }

    /// Last working day of a span of `duration_days` working days that
    /// begins on `start` (inclusive count; `start` must be a working day).
    pub fn span_end(&self, start: NaiveDate, duration_days: u32) -> NaiveDate {
        self.offset_to_date(start, duration_days.saturating_sub(1))
    }

    /// Number of working days in `[from, to]`, inclusive.
    pub fn working_days_between(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        let mut count = 0;
        let mut d = from;
        while d <= to {
            if self.is_working_day(d) {
                count += 1;
            }
            d += Duration::days(1);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_skipped() {
        let cal = WorkingCalendar::new();
        // 2026-08-21 is a Friday.
        assert!(cal.is_working_day(date(2026, 8, 21)));
        assert!(!cal.is_working_day(date(2026, 8, 22)));
        assert_eq!(cal.next_working_day(date(2026, 8, 22)), date(2026, 8, 24));
    }

    #[test]
    fn test_blackout_overrides_weekday() {
        let cal = WorkingCalendar::new().with_blackout(date(2026, 8, 24));
        assert_eq!(cal.next_working_day(date(2026, 8, 22)), date(2026, 8, 25));
    }

    #[test]
    fn test_span_end_crosses_weekend() {
        let cal = WorkingCalendar::new();
        // 3 working days starting Thursday: Thu, Fri, Mon.
        assert_eq!(cal.span_end(date(2026, 8, 20), 3), date(2026, 8, 24));
    }

    #[test]
    fn test_offset_counts_working_days_only() {
        let cal = WorkingCalendar::new();
        // Offset 5 from Monday lands on the following Monday.
        assert_eq!(cal.offset_to_date(date(2026, 8, 24), 5), date(2026, 8, 31));
    }

    #[test]
    fn test_weekend_work() {
        let cal = WorkingCalendar::new().with_weekend_work();
        assert!(cal.is_working_day(date(2026, 8, 22)));
        assert_eq!(cal.working_days_between(date(2026, 8, 17), date(2026, 8, 23)), 7);
    }

    #[test]
    fn test_working_days_between() {
        let cal = WorkingCalendar::new();
        // Mon..Sun inclusive holds five working days.
        assert_eq!(cal.working_days_between(date(2026, 8, 17), date(2026, 8, 23)), 5);
    }
}
