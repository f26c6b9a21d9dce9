//! Time scales used when turning an astronomical instant into a local date.
//!
//! The new moon series yields an instant in dynamical time ([`Tt`]); a
//! polynomial delta-T brings it to universal time ([`Ut`]), and a
//! [`UtcOffset`] picks the civil day it falls on.

use crate::date::Date;
use crate::error::CalendarError;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the date at a given time point,
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

/// Offset of a civil time zone east of UTC, in hours.
///
/// The field is public so that raw (possibly unusual) offsets can flow through
/// the unchecked conversion unchanged; use [`UtcOffset::from_hours`] to
/// validate.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtcOffset(pub f64);

impl UtcOffset {
    /// Indochina Time (UTC+7), used by the Vietnamese calendar since 1968.
    pub const INDOCHINA: UtcOffset = UtcOffset(7.0);
    /// China Standard Time (UTC+8); the same algorithm then yields the Chinese
    /// calendar.
    pub const CHINA: UtcOffset = UtcOffset(8.0);

    /// Creates an offset, rejecting non-finite values and anything outside
    /// the -12..=14 hours civil time zones span.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::UtcOffset;
    ///
    /// assert_eq!(Ok(UtcOffset(5.5)), UtcOffset::from_hours(5.5));
    /// assert!(UtcOffset::from_hours(f64::NAN).is_err());
    /// ```
    pub fn from_hours(hours: f64) -> Result<Self, CalendarError> {
        if hours.is_finite() && (-12.0..=14.0).contains(&hours) {
            Ok(UtcOffset(hours))
        } else {
            Err(CalendarError::InvalidUtcOffset { hours })
        }
    }
    /// Returns the offset in hours.
    pub fn hours(&self) -> f64 {
        self.0
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::INDOCHINA
    }
}

/// Approximates TT − UT in days, `t` being Julian centuries since
/// 1900 January 0.5 TT.
///
/// Two polynomial fits, split at `t = -11` (about 800 AD).
pub fn delta_t(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}

impl Ut {
    /// Converts a TT instant into UT using [`delta_t`] evaluated at `t`
    /// Julian centuries since 1900 January 0.5.
    pub fn from_tt(tt: Tt, t: f64) -> Self {
        Ut(tt.0 - delta_t(t))
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `offset`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::{Ut, UtcOffset};
    ///
    /// let ut = Ut(2451544.25); // 1999-12-31T18:00Z
    /// assert_eq!((1999, 12, 31), ut.date_at(UtcOffset(0.0)).gregorian());
    /// assert_eq!((2000, 1, 1), ut.date_at(UtcOffset::INDOCHINA).gregorian());
    /// ```
    pub fn date_at(&self, offset: UtcOffset) -> Date {
        Date::from_jdn((self.0 + 0.5 + offset.0 / 24.0).floor() as i64)
    }
}
