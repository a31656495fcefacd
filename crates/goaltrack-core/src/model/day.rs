//! The fixed day-month-year date format used by every chat command

use chrono::{Duration, NaiveDate};

use crate::errors::{GoalTrackError, Result};

/// Format accepted in commands and used in replies
pub const DAY_FORMAT: &str = "%d.%m.%Y";

/// Human-readable form of [`DAY_FORMAT`] for error replies
pub const DAY_FORMAT_HINT: &str = "DD.MM.YYYY";

/// Number of days counted by `/result_month`
pub const MONTH_WINDOW_DAYS: i64 = 30;

/// Parse a `DD.MM.YYYY` day
///
/// Rejects impossible calendar days such as `31.02.2024`.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GoalTrackError::InvalidDate {
            input: input.to_string(),
            reason: format!("a date in {} format is required", DAY_FORMAT_HINT),
        });
    }

    // chrono's `%Y` takes any number of digits; the year must be exactly four.
    if !has_day_shape(trimmed) {
        return Err(GoalTrackError::InvalidDate {
            input: trimmed.to_string(),
            reason: format!("expected {}", DAY_FORMAT_HINT),
        });
    }

    NaiveDate::parse_from_str(trimmed, DAY_FORMAT).map_err(|e| GoalTrackError::InvalidDate {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// `D.M.YYYY` with one or two digit day and month and a four digit year
fn has_day_shape(text: &str) -> bool {
    let digits = |part: &str, lens: std::ops::RangeInclusive<usize>| {
        lens.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    let mut parts = text.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year), None) => {
            digits(day, 1..=2) && digits(month, 1..=2) && digits(year, 4..=4)
        }
        _ => false,
    }
}

/// Render a day as `DD.MM.YYYY`
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// First day of the `/result_month` window ending at `today`
pub fn month_window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(MONTH_WINDOW_DAYS)
}

/// Inclusive number of days in `[from, to]`; zero when `from > to`
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> i64 {
    ((to - from).num_days() + 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_valid_day() {
        assert_eq!(parse_day("01.03.2024").unwrap(), d(2024, 3, 1));
        assert_eq!(parse_day(" 29.02.2024 ").unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_parse_rejects_impossible_day() {
        let err = parse_day("31.02.2024").unwrap_err();
        assert!(matches!(err, GoalTrackError::InvalidDate { .. }));
        assert!(parse_day("29.02.2023").is_err());
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_day("2024-03-01").is_err());
        assert!(parse_day("03/01/2024").is_err());
        assert!(parse_day("01.03.2024 extra").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn test_parse_requires_four_digit_year() {
        for input in ["01.03.24", "1.3.999", "01.03.0024x", "01.03.20245", "01.03.+2024"] {
            let err = parse_day(input).unwrap_err();
            assert!(
                matches!(err, GoalTrackError::InvalidDate { .. }),
                "{:?} should be rejected",
                input
            );
        }
        assert_eq!(parse_day("1.3.2024").unwrap(), d(2024, 3, 1));
        assert_eq!(parse_day("01.03.0024").unwrap(), d(24, 3, 1));
    }

    #[test]
    fn test_format_day_is_zero_padded() {
        assert_eq!(format_day(d(2024, 3, 1)), "01.03.2024");
    }

    #[test]
    fn test_month_window_is_thirty_days_back() {
        assert_eq!(month_window_start(d(2024, 3, 31)), d(2024, 3, 1));
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(days_inclusive(d(2024, 3, 1), d(2024, 3, 1)), 1);
        assert_eq!(days_inclusive(d(2024, 3, 1), d(2024, 3, 10)), 10);
        assert_eq!(days_inclusive(d(2024, 3, 10), d(2024, 3, 1)), 0);
    }
}
