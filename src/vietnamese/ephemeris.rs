//! New moon and solar longitude series.
//!
//! Both are low-order truncations of the classical lunar and solar theories,
//! accurate to well under a day over [`SUPPORTED_YEARS`](crate::date::SUPPORTED_YEARS).
//! The coefficients are fixed: changing any of them moves new moons across
//! day boundaries and with them whole months.

use std::f64::consts::PI;

use crate::date::Date;
use crate::time_scales::{Tt, Ut, UtcOffset};

/// Julian date of the new moon numbered 0 (1900-01-01, about 13:51 TT).
pub const LUNATION_EPOCH: f64 = 2415021.076998695;
/// Mean synodic month, in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;

const DR: f64 = PI / 180.0;

/// Index of the lunation whose mean new moon is the last one on or before
/// `date`. This is only an estimate: the true new moon may differ by a day.
pub fn lunation_before(date: Date) -> i64 {
    ((date.jdn() as f64 - LUNATION_EPOCH) / SYNODIC_MONTH).floor() as i64
}

/// Index of the lunation whose mean new moon is closest to `date`.
pub fn nearest_lunation(date: Date) -> i64 {
    ((date.jdn() as f64 - LUNATION_EPOCH) / SYNODIC_MONTH + 0.5).floor() as i64
}

/// Instant of the `k`-th new moon counted from [`LUNATION_EPOCH`].
pub fn new_moon_instant(k: i64) -> Ut {
    let k = k as f64;
    // Julian centuries since 1900 January 0.5
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut jd1 = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd1 += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * DR).sin();
    // sun's mean anomaly
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    // moon's mean anomaly
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    // moon's argument of latitude
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    let mut c1 = (0.1734 - 0.000393 * t) * (m * DR).sin() + 0.0021 * (2.0 * DR * m).sin();
    c1 = c1 - 0.4068 * (mpr * DR).sin() + 0.0161 * (DR * 2.0 * mpr).sin();
    c1 -= 0.0004 * (DR * 3.0 * mpr).sin();
    c1 = c1 + 0.0104 * (DR * 2.0 * f).sin() - 0.0051 * (DR * (m + mpr)).sin();
    c1 = c1 - 0.0074 * (DR * (m - mpr)).sin() + 0.0004 * (DR * (2.0 * f + m)).sin();
    c1 = c1 - 0.0004 * (DR * (2.0 * f - m)).sin() - 0.0006 * (DR * (2.0 * f + mpr)).sin();
    c1 = c1 + 0.001 * (DR * (2.0 * f - mpr)).sin() + 0.0005 * (DR * (2.0 * mpr + m)).sin();

    Ut::from_tt(Tt(jd1 + c1), t)
}

/// Local date of the `k`-th new moon.
///
/// # Example
///
/// ```
/// use amlich::time_scales::UtcOffset;
/// use amlich::vietnamese::ephemeris::new_moon;
///
/// let date = new_moon(1511, UtcOffset::INDOCHINA);
/// assert_eq!("2022-03-03", date.iso_gregorian());
/// ```
pub fn new_moon(k: i64, offset: UtcOffset) -> Date {
    new_moon_instant(k).date_at(offset)
}

/// Apparent ecliptic longitude of the sun at local midnight opening `date`,
/// in radians within `[0, 2π)`.
pub fn sun_longitude(date: Date, offset: UtcOffset) -> f64 {
    // Julian centuries since 2000-01-01T12:00Z
    let t = (date.jdn() as f64 - 2451545.5 - offset.0 / 24.0) / 36525.0;
    let t2 = t * t;
    // mean anomaly and mean longitude, in degrees
    let m = 357.5291 + 35999.0503 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    // equation of center
    let mut dl = (1.9146 - 0.004817 * t - 0.000014 * t2) * (DR * m).sin();
    dl = dl + (0.019993 - 0.000101 * t) * (DR * 2.0 * m).sin() + 0.00029 * (DR * 3.0 * m).sin();
    // nutation and aberration
    let omega = 125.04 - 1934.136 * t;
    let l = (l0 + dl) - 0.00569 - 0.00478 * (omega * DR).sin();

    let l = l * DR;
    l - PI * 2.0 * (l / (PI * 2.0)).floor()
}

/// Index `0..=11` of the 30° slice of ecliptic longitude the sun occupies at
/// local midnight opening `date`. Slice 9 begins at the winter solstice.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::time_scales::UtcOffset;
/// use amlich::vietnamese::ephemeris::sun_station;
///
/// assert_eq!(9, sun_station(Date::from_gregorian(2000, 1, 1), UtcOffset::INDOCHINA));
/// ```
pub fn sun_station(date: Date, offset: UtcOffset) -> u32 {
    (sun_longitude(date, offset) / PI * 6.0).floor() as u32
}
