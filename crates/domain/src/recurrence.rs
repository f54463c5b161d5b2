use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

/// A closed rule describing how a recurring `Reminder` repeats.
///
/// Unknown frequencies are rejected at deserialization, so a pattern that
/// made it into storage always carries one of the four supported
/// frequencies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    /// Number of frequency units between occurrences
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekday indices, 0 = Monday .. 6 = Sunday. Only meaningful for
    /// weekly rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u32>>,
    /// Only meaningful for monthly rules. Days that do not exist in the
    /// target month clamp to that month's last day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    /// Once "now" reaches or passes this, no further occurrences are
    /// generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    /// Maximum occurrence count. Accepted and carried along to successors,
    /// but not enforced: there is no per-series occurrence counter in the
    /// data model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

fn default_interval() -> u32 {
    1
}

impl Default for RecurrencePattern {
    fn default() -> Self {
        Self {
            frequency: Frequency::Daily,
            interval: 1,
            days_of_week: None,
            day_of_month: None,
            end_date: None,
            count: None,
        }
    }
}

impl RecurrencePattern {
    pub fn is_valid(&self) -> bool {
        if self.interval < 1 {
            return false;
        }
        if let Some(days) = &self.days_of_week {
            if days.iter().any(|day| *day > 6) {
                return false;
            }
        }
        if let Some(day) = self.day_of_month {
            if day < 1 || day > 31 {
                return false;
            }
        }
        true
    }
}

/// Computes the next occurrence after `current` for the given pattern, or
/// `None` when the series cannot advance. Pure and deterministic: no clock
/// reads and no mutation, so the same inputs always give the same answer.
///
/// The arithmetic runs on naive wall-clock components. A reminder's
/// timezone is a display label only, which means a daily rule crossing a
/// DST transition keeps the same wall-clock time rather than the same
/// instant.
pub fn next_occurrence(
    current: NaiveDateTime,
    pattern: &RecurrencePattern,
) -> Option<NaiveDateTime> {
    if pattern.interval < 1 {
        warn!(
            "Recurrence pattern with interval {} cannot advance",
            pattern.interval
        );
        return None;
    }
    let interval = pattern.interval;

    match pattern.frequency {
        Frequency::Daily => current.checked_add_signed(Duration::days(interval as i64)),
        Frequency::Weekly => match &pattern.days_of_week {
            None => current.checked_add_signed(Duration::days(7 * interval as i64)),
            Some(days) => {
                // Bounded scan so a degenerate weekday set cannot loop
                // forever. For a well-formed set the first hit is always
                // within seven days.
                let mut next = current + Duration::days(1);
                for _ in 0..(7 * interval) {
                    if days.contains(&next.weekday().num_days_from_monday()) {
                        return Some(next);
                    }
                    next += Duration::days(1);
                }
                warn!("No matching weekday within bound for weekly pattern: {:?}", days);
                None
            }
        },
        Frequency::Monthly => {
            let mut next = current.checked_add_months(Months::new(interval))?;
            if let Some(day) = pattern.day_of_month {
                next = with_day_clamped(next, day);
            }
            Some(next)
        }
        Frequency::Yearly => interval
            .checked_mul(12)
            .and_then(|months| current.checked_add_months(Months::new(months))),
    }
}

/// Forces the day component to `day`, clamping to the last day of the
/// month when the month is shorter.
fn with_day_clamped(dt: NaiveDateTime, day: u32) -> NaiveDateTime {
    match dt.date().with_day(day) {
        Some(date) => date.and_time(dt.time()),
        None => last_day_of_month(dt.date()).and_time(dt.time()),
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next_month) => next_month - Duration::days(1),
        None => date,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn daily_advances_by_exactly_interval_days() {
        for interval in 1..30 {
            let pattern = RecurrencePattern {
                frequency: Frequency::Daily,
                interval,
                ..Default::default()
            };
            let current = dt(2025, 1, 15, 9, 30);
            assert_eq!(
                next_occurrence(current, &pattern),
                Some(current + Duration::days(interval as i64))
            );
        }
    }

    #[test]
    fn weekly_without_days_advances_by_whole_weeks() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Weekly,
            interval: 2,
            ..Default::default()
        };
        assert_eq!(
            next_occurrence(dt(2025, 1, 6, 8, 0), &pattern),
            Some(dt(2025, 1, 20, 8, 0))
        );
    }

    #[test]
    fn weekly_with_monday_set_finds_strictly_future_monday() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Weekly,
            interval: 1,
            days_of_week: Some(vec![0]),
            ..Default::default()
        };
        // 2025-01-06 is a Monday. Starting from any weekday, the result is
        // the nearest Monday after the reference, never the same day.
        for offset in 0..7 {
            let current = dt(2025, 1, 6, 10, 0) + Duration::days(offset);
            let next = next_occurrence(current, &pattern).unwrap();
            assert_eq!(next.weekday().num_days_from_monday(), 0);
            assert!(next > current);
            assert!(next <= current + Duration::days(7));
        }
    }

    #[test]
    fn weekly_wednesday_skip_lands_on_following_monday() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Weekly,
            interval: 1,
            days_of_week: Some(vec![0]),
            ..Default::default()
        };
        // 2025-01-08 is a Wednesday, the following Monday is 2025-01-13.
        assert_eq!(
            next_occurrence(dt(2025, 1, 8, 17, 0), &pattern),
            Some(dt(2025, 1, 13, 17, 0))
        );
    }

    #[test]
    fn weekly_with_empty_day_set_gives_up_within_bound() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Weekly,
            interval: 3,
            days_of_week: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(next_occurrence(dt(2025, 1, 6, 8, 0), &pattern), None);
    }

    #[test]
    fn monthly_advances_by_calendar_months() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Monthly,
            interval: 1,
            ..Default::default()
        };
        assert_eq!(
            next_occurrence(dt(2025, 1, 15, 17, 0), &pattern),
            Some(dt(2025, 2, 15, 17, 0))
        );
    }

    #[test]
    fn monthly_day_31_clamps_to_last_day_of_april() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Monthly,
            interval: 1,
            day_of_month: Some(31),
            ..Default::default()
        };
        assert_eq!(
            next_occurrence(dt(2025, 3, 31, 12, 0), &pattern),
            Some(dt(2025, 4, 30, 12, 0))
        );
    }

    #[test]
    fn monthly_day_31_clamps_in_february_and_recovers_in_march() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Monthly,
            interval: 1,
            day_of_month: Some(31),
            ..Default::default()
        };
        // January 15th -> forced to the 31st of February's neighbor months.
        let jan = next_occurrence(dt(2025, 1, 15, 17, 0), &pattern).unwrap();
        assert_eq!(jan, dt(2025, 2, 28, 17, 0));
        let feb = next_occurrence(jan, &pattern).unwrap();
        assert_eq!(feb, dt(2025, 3, 31, 17, 0));
        let mar = next_occurrence(feb, &pattern).unwrap();
        assert_eq!(mar, dt(2025, 4, 30, 17, 0));
    }

    #[test]
    fn monthly_without_day_keeps_day_when_it_exists() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Monthly,
            interval: 2,
            ..Default::default()
        };
        assert_eq!(
            next_occurrence(dt(2025, 1, 10, 7, 45), &pattern),
            Some(dt(2025, 3, 10, 7, 45))
        );
    }

    #[test]
    fn yearly_advances_by_calendar_years() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Yearly,
            interval: 1,
            ..Default::default()
        };
        assert_eq!(
            next_occurrence(dt(2025, 6, 1, 9, 0), &pattern),
            Some(dt(2026, 6, 1, 9, 0))
        );
    }

    #[test]
    fn yearly_clamps_leap_day() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Yearly,
            interval: 1,
            ..Default::default()
        };
        assert_eq!(
            next_occurrence(dt(2024, 2, 29, 9, 0), &pattern),
            Some(dt(2025, 2, 28, 9, 0))
        );
    }

    #[test]
    fn zero_interval_never_advances() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Daily,
            interval: 0,
            ..Default::default()
        };
        assert_eq!(next_occurrence(dt(2025, 1, 1, 0, 0), &pattern), None);
    }

    #[test]
    fn determinism_for_identical_inputs() {
        let pattern = RecurrencePattern {
            frequency: Frequency::Weekly,
            interval: 1,
            days_of_week: Some(vec![1, 3, 5]),
            ..Default::default()
        };
        let current = dt(2025, 5, 20, 14, 0);
        assert_eq!(
            next_occurrence(current, &pattern),
            next_occurrence(current, &pattern)
        );
    }

    #[test]
    fn validates_pattern_shape() {
        assert!(RecurrencePattern::default().is_valid());
        assert!(!RecurrencePattern {
            interval: 0,
            ..Default::default()
        }
        .is_valid());
        assert!(!RecurrencePattern {
            frequency: Frequency::Weekly,
            days_of_week: Some(vec![0, 7]),
            ..Default::default()
        }
        .is_valid());
        assert!(!RecurrencePattern {
            frequency: Frequency::Monthly,
            day_of_month: Some(0),
            ..Default::default()
        }
        .is_valid());
        assert!(!RecurrencePattern {
            frequency: Frequency::Monthly,
            day_of_month: Some(32),
            ..Default::default()
        }
        .is_valid());
    }

    #[test]
    fn rejects_unknown_frequency_at_deserialization() {
        let res = serde_json::from_str::<RecurrencePattern>(r#"{ "frequency": "hourly" }"#);
        assert!(res.is_err());
        let res = serde_json::from_str::<RecurrencePattern>(r#"{ "frequency": "daily" }"#);
        assert_eq!(res.unwrap().interval, 1);
    }
}
