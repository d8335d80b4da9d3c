//! Calendar rules for fiscal periods.
//!
//! Periods must form a contiguous, non-overlapping sequence of date ranges.

use chrono::{Datelike, NaiveDate};

use super::error::PeriodError;
use super::period::FiscalPeriod;

/// Validates that `start_date` is on or before `end_date`.
///
/// # Errors
///
/// Returns `PeriodError::InvalidDateRange` otherwise.
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), PeriodError> {
    if start_date > end_date {
        return Err(PeriodError::InvalidDateRange);
    }
    Ok(())
}

/// Checks if two inclusive date ranges overlap.
///
/// Two ranges [a_start, a_end] and [b_start, b_end] overlap if:
/// a_start <= b_end AND a_end >= b_start
#[must_use]
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Validates that a new period can be inserted next to the existing ones.
///
/// The new period must not overlap any existing period, and when periods
/// already exist it must start the day after the latest period ends
/// (contiguity).
///
/// # Errors
///
/// Returns `InvalidDateRange`, `Overlapping`, or `NotContiguous`.
pub fn validate_insertion(
    existing: &[FiscalPeriod],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), PeriodError> {
    validate_date_range(start_date, end_date)?;

    for period in existing {
        if date_ranges_overlap(period.start_date, period.end_date, start_date, end_date) {
            return Err(PeriodError::Overlapping(period.name.clone()));
        }
    }

    if let Some(latest_end) = existing.iter().map(|p| p.end_date).max() {
        let expected_start = latest_end.succ_opt().ok_or(PeriodError::InvalidDateRange)?;
        if start_date != expected_start {
            return Err(PeriodError::NotContiguous {
                expected_start,
                actual_start: start_date,
            });
        }
    }

    Ok(())
}

/// Generates contiguous monthly periods covering `start_date..=end_date`.
///
/// The first and last period are clipped to the supplied range.
///
/// # Errors
///
/// Returns `PeriodError::InvalidDateRange` when the range is backwards.
pub fn generate_monthly_periods(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<FiscalPeriod>, PeriodError> {
    validate_date_range(start_date, end_date)?;

    let mut periods = Vec::new();
    let mut current = start_date;

    while current <= end_date {
        let month_end = last_day_of_month(current.year(), current.month());
        let period_end = if month_end > end_date {
            end_date
        } else {
            month_end
        };

        let name = format!("{} {}", month_name(current.month()), current.year());
        periods.push(FiscalPeriod::open(name, current, period_end)?);

        // Move to first day of next month
        current = if current.month() == 12 {
            NaiveDate::from_ymd_opt(current.year() + 1, 1, 1).expect("valid date")
        } else {
            NaiveDate::from_ymd_opt(current.year(), current.month() + 1, 1).expect("valid date")
        };
    }

    Ok(periods)
}

/// Returns the last day of a month.
fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month
        .expect("valid date")
        .pred_opt()
        .expect("valid date")
}

/// Returns month name.
fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_generate_monthly_periods_full_year() {
        let periods = generate_monthly_periods(d(2026, 1, 1), d(2026, 12, 31)).unwrap();

        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].name, "January 2026");
        assert_eq!(periods[0].start_date, d(2026, 1, 1));
        assert_eq!(periods[0].end_date, d(2026, 1, 31));
        assert_eq!(periods[11].name, "December 2026");
        assert_eq!(periods[11].end_date, d(2026, 12, 31));
    }

    #[test]
    fn test_generated_periods_are_contiguous() {
        let periods = generate_monthly_periods(d(2026, 4, 1), d(2027, 3, 31)).unwrap();
        assert_eq!(periods.len(), 12);
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end_date.succ_opt().unwrap(), pair[1].start_date);
        }
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2026, 1), d(2026, 1, 31));
        assert_eq!(last_day_of_month(2026, 2), d(2026, 2, 28));
        assert_eq!(last_day_of_month(2024, 2), d(2024, 2, 29)); // Leap year
        assert_eq!(last_day_of_month(2026, 4), d(2026, 4, 30));
        assert_eq!(last_day_of_month(2026, 12), d(2026, 12, 31));
    }

    #[test]
    fn test_insertion_into_empty_calendar() {
        assert!(validate_insertion(&[], d(2026, 1, 1), d(2026, 1, 31)).is_ok());
    }

    #[test]
    fn test_insertion_must_be_adjacent() {
        let existing =
            vec![FiscalPeriod::open("January 2026", d(2026, 1, 1), d(2026, 1, 31)).unwrap()];

        assert!(validate_insertion(&existing, d(2026, 2, 1), d(2026, 2, 28)).is_ok());

        // A one-day gap is rejected.
        let err = validate_insertion(&existing, d(2026, 2, 2), d(2026, 2, 28)).unwrap_err();
        assert!(matches!(err, PeriodError::NotContiguous { .. }));
    }

    #[test]
    fn test_insertion_rejects_overlap() {
        let existing =
            vec![FiscalPeriod::open("January 2026", d(2026, 1, 1), d(2026, 1, 31)).unwrap()];

        let err = validate_insertion(&existing, d(2026, 1, 15), d(2026, 2, 15)).unwrap_err();
        assert!(matches!(err, PeriodError::Overlapping(_)));
    }

    #[test]
    fn test_backwards_range_rejected() {
        assert!(matches!(
            validate_insertion(&[], d(2026, 2, 1), d(2026, 1, 1)),
            Err(PeriodError::InvalidDateRange)
        ));
    }
}
