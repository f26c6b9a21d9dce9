//! Calendar-independent date.

use std::ops::{Add, Sub};

use crate::error::CalendarError;

/// Julian day number of 1582-10-15, the first day of the Gregorian calendar.
pub const GREGORIAN_REFORM: i64 = 2299161;

/// Years for which the lunisolar algorithm is considered accurate.
///
/// Only the checked entry points enforce this window.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1200..=2999;

/// A calendar-independent date.
///
/// Internally a Julian day number (JDN), so ordering and differences are plain
/// integer arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    jdn: i64,
}

/// Returns the Julian day number of a civil date.
///
/// Dates from 1582-10-15 on are read as Gregorian, earlier ones as Julian.
/// Fields are not validated: `day = 32` simply lands one day past the 31st.
///
/// # Example
///
/// ```
/// use amlich::date::julian_day_number;
///
/// assert_eq!(2451545, julian_day_number(1, 1, 2000));
/// assert_eq!(2299160, julian_day_number(4, 10, 1582)); // Julian
/// assert_eq!(2299161, julian_day_number(15, 10, 1582)); // Gregorian
/// ```
pub fn julian_day_number(day: i32, month: i32, year: i32) -> i64 {
    let (d, m, y) = (day as i64, month as i64, year as i64);
    let a = (14 - m).div_euclid(12);
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    let jdn = d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045;
    if jdn < GREGORIAN_REFORM {
        d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083
    } else {
        jdn
    }
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: i64) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i64 {
        self.jdn
    }

    /// Creates a `Date` from civil calendar fields, see [`julian_day_number`].
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Self {
        Self::from_jdn(julian_day_number(day, month, year))
    }

    /// Like [`Date::from_gregorian`], but rejects fields that do not name a
    /// real day inside [`SUPPORTED_YEARS`].
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{CalendarError, Date};
    ///
    /// assert!(Date::checked_gregorian(2024, 2, 29).is_ok());
    /// assert_eq!(
    ///     Err(CalendarError::InvalidDay { day: 29, month: 2, max_day: 28 }),
    ///     Date::checked_gregorian(2023, 2, 29),
    /// );
    /// ```
    pub fn checked_gregorian(year: i32, month: i32, day: i32) -> Result<Self, CalendarError> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(CalendarError::YearOutOfRange { year });
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = days_in_month(month, YearType::from_year(year));
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        if (year, month) == (1582, 10) && (5..=14).contains(&day) {
            return Err(CalendarError::DroppedByReform { day });
        }
        Ok(Self::from_gregorian(year, month, day))
    }

    /// Represents the date in the civil calendar in force on that day
    /// (Julian before 1582-10-15, Gregorian after).
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// assert_eq!((2000, 1, 1), Date::from_jdn(2451545).gregorian());
    /// assert_eq!((1582, 10, 4), Date::from_jdn(2299160).gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let (b, c) = if self.jdn >= GREGORIAN_REFORM {
            let a = self.jdn + 32044;
            let b = (4 * a + 3).div_euclid(146097);
            (b, a - (146097 * b).div_euclid(4))
        } else {
            (0, self.jdn + 32082)
        };
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        let day = e - (153 * m + 2).div_euclid(5) + 1;
        let month = m + 3 - 12 * m.div_euclid(10);
        let year = 100 * b + d - 4800 + m.div_euclid(10);
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2022, 9, 18);
    /// assert_eq!("2022-09-18", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }
}

// Both saturate: new moons for absurd years can land on the i64 limits.
impl Add<i64> for Date {
    type Output = Date;
    fn add(self, rhs: i64) -> Self::Output {
        Date::from_jdn(self.jdn.saturating_add(rhs))
    }
}
impl Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn.saturating_sub(rhs.jdn)
    }
}

// JDN 1721426 is 0001-01-01 in the proleptic Gregorian calendar, chrono's day 1.
#[cfg(feature = "chrono")]
const CHRONO_CE_OFFSET: i64 = 1721425;

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Date::from_jdn(date.num_days_from_ce() as i64 + CHRONO_CE_OFFSET)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = CalendarError;
    fn try_from(date: Date) -> Result<Self, Self::Error> {
        date.jdn
            .checked_sub(CHRONO_CE_OFFSET)
            .and_then(|days| i32::try_from(days).ok())
            .and_then(chrono::NaiveDate::from_num_days_from_ce_opt)
            .ok_or(CalendarError::OutsideChronoRange { jdn: date.jdn })
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in the calendar [`Date`] reads it
    /// in: Julian rule before 1582, Gregorian rule from 1582 on.
    pub fn from_year(year: i32) -> Self {
        let leap = if year < 1582 {
            year.rem_euclid(4) == 0
        } else {
            year % 4 == 0 && year % 100 != 0 || year % 400 == 0
        };
        if leap { Self::Leap } else { Self::Common }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn days_in_month(month: i32, year_type: YearType) -> i32 {
    match month {
        2 => 28 + year_type.is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
