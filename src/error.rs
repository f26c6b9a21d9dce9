//! Error types for the checked and inverse conversions.
//!
//! The core conversion is total and never fails; only entry points that
//! validate their input report these.

use crate::vietnamese::Month;

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year lies outside [`SUPPORTED_YEARS`](crate::date::SUPPORTED_YEARS).
    #[error("year {year} is outside the supported range 1200..=2999")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The rejected month number.
        month: i32,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The rejected day number.
        day: i32,
        /// The month for which the day is invalid.
        month: i32,
        /// The last day of that month.
        max_day: i32,
    },

    /// Returned for 1582-10-05 through 1582-10-14, which never existed.
    #[error("1582-10-{day:02} was dropped by the Gregorian reform")]
    DroppedByReform {
        /// The rejected day of October 1582.
        day: i32,
    },

    /// Returned when a UTC offset is non-finite or outside -12..=14 hours.
    #[error("invalid UTC offset: {hours} hours (must be within -12..=14)")]
    InvalidUtcOffset {
        /// The rejected offset in hours.
        hours: f64,
    },

    /// Returned when a date does not fit in `chrono::NaiveDate`.
    #[error("julian day {jdn} is outside the range of chrono::NaiveDate")]
    OutsideChronoRange {
        /// The date's Julian day number.
        jdn: i64,
    },

    /// Returned when a lunar date names a month or day that does not occur.
    #[error("lunar date {year}-{month}-{day} does not exist")]
    NonexistentLunarDate {
        /// Lunar year.
        year: i32,
        /// Month name.
        month: Month,
        /// Lunar day.
        day: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_year_out_of_range() {
        let e = CalendarError::YearOutOfRange { year: 1066 };
        assert_eq!(
            e.to_string(),
            "year 1066 is outside the supported range 1200..=2999"
        );
    }

    #[test]
    fn error_invalid_day() {
        let e = CalendarError::InvalidDay {
            day: 30,
            month: 2,
            max_day: 29,
        };
        assert_eq!(e.to_string(), "invalid day: 30 for month 2 (max 29)");
    }

    #[test]
    fn error_dropped_by_reform() {
        let e = CalendarError::DroppedByReform { day: 5 };
        assert_eq!(e.to_string(), "1582-10-05 was dropped by the Gregorian reform");
    }

    #[test]
    fn error_invalid_utc_offset() {
        let e = CalendarError::InvalidUtcOffset { hours: 15.5 };
        assert_eq!(
            e.to_string(),
            "invalid UTC offset: 15.5 hours (must be within -12..=14)"
        );
    }

    #[test]
    fn error_outside_chrono_range() {
        let e = CalendarError::OutsideChronoRange { jdn: -200_000_000 };
        assert_eq!(
            e.to_string(),
            "julian day -200000000 is outside the range of chrono::NaiveDate"
        );
    }

    #[test]
    fn error_nonexistent_lunar_date() {
        let e = CalendarError::NonexistentLunarDate {
            year: 2022,
            month: Month::Leap(4),
            day: 1,
        };
        assert_eq!(e.to_string(), "lunar date 2022-4+-1 does not exist");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
