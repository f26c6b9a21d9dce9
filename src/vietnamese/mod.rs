//! Vietnamese lunisolar calendar (âm lịch).
//!
//! Months begin on the local day of a new moon. Month 11 is the month in
//! which the sun enters the winter-solstice slice of the ecliptic, and every
//! other month is numbered from it. When thirteen lunations separate two
//! consecutive month-11 new moons, the first month that the sun does not
//! move into a new slice in is a leap month and repeats the previous number.
//!
//! New moons and solar longitudes are computed from truncated series, see
//! [`ephemeris`]. Day boundaries follow a configurable [`UtcOffset`]; at
//! UTC+7 the result is the calendar used in Vietnam, at UTC+8 the Chinese one.
//!
//! # Example
//!
//! ```
//! use amlich::vietnamese::{convert_solar_to_lunar, Month::*};
//!
//! let lunar = convert_solar_to_lunar(18, 9, 2022, 7.0);
//! assert_eq!((2022, Common(8), 23), (lunar.year, lunar.month, lunar.day));
//! ```

use std::fmt;

use log::{debug, trace};

use crate::date::Date;
use crate::error::CalendarError;
use crate::time_scales::UtcOffset;

pub mod ephemeris;
mod iter;

pub use iter::LunarDates;

use ephemeris::{SYNODIC_MONTH, lunation_before, nearest_lunation, new_moon, sun_station};

/// Month name, `Common` for an ordinary month and `Leap` for an inserted one
/// repeating the number of the month before it.
///
/// The number is within `1..=12` for any real date. Unvalidated input far
/// from its month 11 anchors yields whatever the numbering arithmetic gives,
/// zero or negative included.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Month {
    Common(i32),
    Leap(i32),
}
impl Month {
    /// Returns the month number, leap or not.
    pub fn num(&self) -> i32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` for a leap month, `false` otherwise.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
}

/// Formats the number, followed by `+` for a leap month.
impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Month::Common(n) => write!(f, "{n}"),
            Month::Leap(n) => write!(f, "{n}+"),
        }
    }
}

/// A date in the lunisolar calendar.
///
/// Inside [`SUPPORTED_YEARS`](crate::date::SUPPORTED_YEARS) `day` is within
/// `1..=30`, except for the rare day before a late new moon, which is
/// reported as day 0 of the following month. Far outside it the series drift
/// and any day number can come out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarDate {
    pub year: i32,
    pub month: Month,
    pub day: i32,
}

impl LunarDate {
    pub fn new(year: i32, month: Month, day: i32) -> Self {
        Self { year, month, day }
    }
    pub fn is_leap_month(&self) -> bool {
        self.month.is_leap()
    }
}

/// Formats as the `day/month` label shown under a calendar cell, e.g. `23/8`
/// or `1/4+`.
impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.month)
    }
}

/// A month start within an [`Annus`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    /// Month name
    pub month: Month,
    /// Lunar year the month belongs to
    pub year: i32,
    /// Local date of the new moon
    pub date: Date,
}

/// Returns the local date of the new moon opening month 11 of `year`, i.e.
/// the last new moon before the sun reaches the winter solstice slice.
///
/// # Example
///
/// ```
/// use amlich::time_scales::UtcOffset;
/// use amlich::vietnamese::month_11;
///
/// assert_eq!("2022-11-24", month_11(2022, UtcOffset::INDOCHINA).iso_gregorian());
/// ```
pub fn month_11(year: i32, offset: UtcOffset) -> Date {
    let off = Date::from_gregorian(year, 12, 31).jdn() - 2415021;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i64;
    let nm = new_moon(k, offset);
    if sun_station(nm, offset) >= 9 {
        trace!("new moon on {} is past the solstice, stepping back", nm.iso_gregorian());
        new_moon(k - 1, offset)
    } else {
        nm
    }
}

/// Returns how many lunations after `month_11` the leap month falls: the
/// first lunation during which the sun stays within one 30° slice.
///
/// Only meaningful when thirteen lunations follow `month_11` before the next
/// month 11. The search gives up after thirteen steps.
pub fn leap_month_offset(month_11: Date, offset: UtcOffset) -> u32 {
    let k = nearest_lunation(month_11);
    let mut i = 1;
    let mut station = sun_station(new_moon(k + i, offset), offset);
    loop {
        let last = station;
        i += 1;
        station = sun_station(new_moon(k + i, offset), offset);
        if station == last || i >= 14 {
            break;
        }
    }
    trace!("leap month {} lunations after {}", i - 1, month_11.iso_gregorian());
    (i - 1) as u32
}

/// Returns the local date of the new moon opening the lunar month that
/// contains `date`.
///
/// The lunation is estimated from the mean synodic month and corrected once.
/// When the true new moon is late enough that both candidates lie after
/// `date`, the later of the two is returned, and `date` ends up on day 0.
pub fn month_start(date: Date, offset: UtcOffset) -> Date {
    let k = lunation_before(date);
    let start = new_moon(k + 1, offset);
    if start > date {
        new_moon(k, offset)
    } else {
        start
    }
}

/// Span between two consecutive month-11 new moons.
///
/// Month names are assigned within an annus: 11 and 12 belong to the
/// previous lunar year, 1 to 10 to the one the annus is numbered after.
///
/// # Example
///
/// ```
/// use amlich::time_scales::UtcOffset;
/// use amlich::vietnamese::{Annus, Month::*};
///
/// let annus = Annus::new(2017, UtcOffset::INDOCHINA);
/// assert!(annus.is_leap());
/// assert_eq!(Leap(6), annus.months()[8].month);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Annus {
    /// The solar year most of the span falls in
    pub annus: i32,
    /// First day of month 11 opening the span
    pub start: Date,
    /// First day of month 11 after the span
    pub end: Date,
    /// Lunations from `start` to the leap month, for thirteen-month spans
    pub leap_offset: Option<u32>,
    offset: UtcOffset,
}

impl Annus {
    /// The annus that ends with month 11 of `annus`.
    pub fn new(annus: i32, offset: UtcOffset) -> Self {
        Self::between(
            annus,
            month_11(annus - 1, offset),
            month_11(annus, offset),
            offset,
        )
    }

    /// The annus holding the month that starts on `month_start`, as seen from
    /// a date in solar `year`.
    pub fn containing(month_start: Date, year: i32, offset: UtcOffset) -> Self {
        let m11 = month_11(year, offset);
        if m11 >= month_start {
            Self::between(year, month_11(year - 1, offset), m11, offset)
        } else {
            Self::between(year + 1, m11, month_11(year + 1, offset), offset)
        }
    }

    fn between(annus: i32, start: Date, end: Date, offset: UtcOffset) -> Self {
        let leap_offset = if end - start > 365 {
            let leap_offset = leap_month_offset(start, offset);
            debug!("annus {annus} has 13 months, leap month at lunation {leap_offset}");
            Some(leap_offset)
        } else {
            None
        };
        Annus {
            annus,
            start,
            end,
            leap_offset,
            offset,
        }
    }

    pub fn is_leap(&self) -> bool {
        self.leap_offset.is_some()
    }

    /// Names the month starting on `month_start`, returning `(lunar year,
    /// month)`.
    pub fn month_at(&self, month_start: Date) -> (i32, Month) {
        let diff = (month_start - self.start).div_euclid(29);
        let mut num = diff + 11;
        let mut leap = false;
        if let Some(leap_offset) = self.leap_offset.map(i64::from) {
            if diff >= leap_offset {
                num = diff + 10;
                leap = diff == leap_offset;
            }
        }
        if num > 12 {
            num -= 12;
        }
        let year = if num >= 11 && diff < 4 {
            self.annus - 1
        } else {
            self.annus
        };
        let num = num as i32;
        (year, if leap { Month::Leap(num) } else { Month::Common(num) })
    }

    /// All month starts of the annus, from month 11 up to the last month
    /// before `end`.
    pub fn months(&self) -> Vec<NewMoon> {
        let k = nearest_lunation(self.start);
        let count = if self.is_leap() { 13 } else { 12 };
        (0..count)
            .map(|i| {
                let date = new_moon(k + i, self.offset);
                let (year, month) = self.month_at(date);
                NewMoon { month, year, date }
            })
            .collect()
    }
}

/// Converts a solar date into the lunisolar calendar.
///
/// Fields are not validated (see [`Converter::checked_lunar_date`]), and
/// out-of-range ones feed the arithmetic as they are, so the month number or
/// the day may come out zero or negative. `offset_hours` is the time zone east
/// of UTC, 7 for Vietnam.
///
/// # Panics
///
/// With overflow checks enabled, panics when `year` is `i32::MIN` or
/// `i32::MAX`, as the neighbouring year's month 11 is needed.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::{convert_solar_to_lunar, LunarDate, Month::*};
///
/// assert_eq!(
///     LunarDate::new(2023, Leap(2), 1),
///     convert_solar_to_lunar(22, 3, 2023, 7.0),
/// );
/// assert_eq!(
///     LunarDate::new(2022, Common(-3), 12),
///     convert_solar_to_lunar(-400, 1, 2022, 7.0),
/// );
/// ```
pub fn convert_solar_to_lunar(day: i32, month: i32, year: i32, offset_hours: f64) -> LunarDate {
    let date = Date::from_gregorian(year, month, day);
    convert(date, year, UtcOffset(offset_hours))
}

fn convert(date: Date, year: i32, offset: UtcOffset) -> LunarDate {
    let start = month_start(date, offset);
    let (lunar_year, month) = Annus::containing(start, year, offset).month_at(start);
    lunar_date_in(date, start, lunar_year, month)
}

fn lunar_date_in(date: Date, month_start: Date, year: i32, month: Month) -> LunarDate {
    let day = (date - month_start).saturating_add(1);
    if day < 1 {
        debug!("{} precedes its month start {}", date.iso_gregorian(), month_start.iso_gregorian());
    }
    LunarDate {
        year,
        month,
        day: day as i32,
    }
}

/// Converter between solar dates and the lunisolar calendar at a fixed UTC
/// offset.
///
/// Stateless and `Copy`; share or clone freely across threads.
///
/// # Example
///
/// ```
/// use amlich::{Converter, Date};
/// use amlich::vietnamese::{LunarDate, Month::*};
///
/// let converter = Converter::default(); // UTC+7
/// let date = Date::from_gregorian(2024, 2, 10);
/// let lunar = converter.lunar_date(date);
///
/// assert_eq!(LunarDate::new(2024, Common(1), 1), lunar);
/// assert_eq!(Ok(date), converter.solar_date(lunar));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Converter {
    offset: UtcOffset,
}

impl Converter {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Converts `date`. Same as [`convert_solar_to_lunar`] on the date's own
    /// civil fields.
    pub fn lunar_date(&self, date: Date) -> LunarDate {
        convert(date, date.gregorian().0, self.offset)
    }

    /// Validates the civil date and the configured offset, then converts.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{CalendarError, Converter};
    ///
    /// let converter = Converter::default();
    /// assert!(converter.checked_lunar_date(2022, 9, 18).is_ok());
    /// assert_eq!(
    ///     Err(CalendarError::YearOutOfRange { year: 3000 }),
    ///     converter.checked_lunar_date(3000, 1, 1),
    /// );
    /// ```
    pub fn checked_lunar_date(
        &self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<LunarDate, CalendarError> {
        UtcOffset::from_hours(self.offset.0)?;
        let date = Date::checked_gregorian(year, month, day)
            .inspect_err(|e| debug!("rejected {year}-{month}-{day}: {e}"))?;
        Ok(convert(date, year, self.offset))
    }

    /// Finds the solar date of `lunar`.
    ///
    /// Fails if the month does not occur in that lunar year, or the day is 0
    /// or past the end of the month.
    pub fn solar_date(&self, lunar: LunarDate) -> Result<Date, CalendarError> {
        let nonexistent = || CalendarError::NonexistentLunarDate {
            year: lunar.year,
            month: lunar.month,
            day: lunar.day,
        };
        let annus = if lunar.month.num() >= 11 {
            self.annus(lunar.year + 1)
        } else {
            self.annus(lunar.year)
        };
        let months = annus.months();
        let idx = months
            .iter()
            .position(|m| (m.year, m.month) == (lunar.year, lunar.month))
            .ok_or_else(nonexistent)?;
        let start = months[idx].date;
        let end = months.get(idx + 1).map_or(annus.end, |m| m.date);
        let day = i64::from(lunar.day);
        if day < 1 || day > end - start {
            return Err(nonexistent());
        }
        Ok(start + (day - 1))
    }

    /// See [`month_11`].
    pub fn month_11(&self, year: i32) -> Date {
        month_11(year, self.offset)
    }

    /// See [`Annus::new`].
    pub fn annus(&self, annus: i32) -> Annus {
        Annus::new(annus, self.offset)
    }

    /// Iterates over consecutive days from `start` with their lunar dates.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{Converter, Date};
    ///
    /// let labels: Vec<String> = Converter::default()
    ///     .lunar_dates(Date::from_gregorian(2022, 9, 24))
    ///     .take(3)
    ///     .map(|(_, lunar)| lunar.to_string())
    ///     .collect();
    /// assert_eq!(["29/8", "30/8", "1/9"], labels.as_slice());
    /// ```
    pub fn lunar_dates(&self, start: Date) -> LunarDates {
        LunarDates::new(start, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    const ICT: UtcOffset = UtcOffset::INDOCHINA;

    #[test]
    fn month_11_anchors() {
        for (year, at_ict, at_cst) in [
            (1984, 2446028, 2446057),
            (1999, 2451521, 2451521),
            (2016, 2457722, 2457722),
            (2017, 2458106, 2458106),
            (2020, 2459198, 2459199),
            (2022, 2459908, 2459908),
            (2024, 2460646, 2460646),
        ] {
            assert_eq!(
                (at_ict, at_cst),
                (
                    month_11(year, ICT).jdn(),
                    month_11(year, UtcOffset::CHINA).jdn()
                ),
                "{year}"
            );
        }
    }

    #[test]
    fn leap_offsets() {
        for (year, offset) in [(2016, 8), (2019, 6), (2022, 4), (2024, 8)] {
            assert_eq!(offset, leap_month_offset(month_11(year, ICT), ICT), "{year}");
        }
    }

    #[test]
    fn months() {
        let annus = Annus::new(2000, ICT);
        let stds = [
            (11, "1999-12-08"),
            (12, "2000-01-07"),
            (1, "2000-02-05"),
            (2, "2000-03-06"),
            (3, "2000-04-05"),
            (4, "2000-05-04"),
            (5, "2000-06-02"),
            (6, "2000-07-02"),
            (7, "2000-07-31"),
            (8, "2000-08-29"),
            (9, "2000-09-28"),
            (10, "2000-10-27"),
        ];
        assert!(!annus.is_leap());
        assert_eq!("2000-11-26", annus.end.iso_gregorian());
        assert_eq!(stds.len(), annus.months().len());
        for (std, month) in stds.iter().zip(annus.months()) {
            assert_eq!(Common(std.0), month.month);
            assert_eq!(std.1, month.date.iso_gregorian());
        }
    }

    #[test]
    fn leap_months() {
        let stds = [
            (11, "2016-11-29"),
            (12, "2016-12-29"),
            (1, "2017-01-28"),
            (2, "2017-02-26"),
            (3, "2017-03-28"),
            (4, "2017-04-26"),
            (5, "2017-05-26"),
            (6, "2017-06-24"),
            (-6, "2017-07-23"),
            (7, "2017-08-22"),
            (8, "2017-09-20"),
            (9, "2017-10-20"),
            (10, "2017-11-18"),
        ];
        let annus = Annus::new(2017, ICT);
        assert_eq!(Some(8), annus.leap_offset);
        let months = annus.months();
        for (std, month) in stds.iter().zip(&months) {
            let std_month = if std.0 > 0 {
                Common(std.0)
            } else {
                Leap(-std.0)
            };
            let std_year = if std.0 >= 11 { 2016 } else { 2017 };
            assert_eq!(
                (std_year, std_month, std.1.into()),
                (month.year, month.month, month.date.iso_gregorian())
            );
        }
        assert_eq!(stds.len(), months.len());
        assert_eq!("2017-12-18", annus.end.iso_gregorian());
    }

    #[test]
    fn dates() {
        let data = [
            ((2016, 11, 29), (2016, Common(11), 1)),
            ((2017, 1, 27), (2016, Common(12), 30)),
            ((2017, 1, 28), (2017, Common(1), 1)),
            ((2017, 7, 22), (2017, Common(6), 29)),
            ((2017, 7, 23), (2017, Leap(6), 1)),
            ((2017, 12, 17), (2017, Common(10), 30)),
            ((2017, 12, 18), (2017, Common(11), 1)),
            ((2022, 9, 18), (2022, Common(8), 23)),
            ((2022, 9, 22), (2022, Common(8), 27)),
            ((2022, 9, 23), (2022, Common(8), 28)),
            ((2000, 1, 1), (1999, Common(11), 25)),
        ];
        for ((y, m, d), (ly, lm, ld)) in data {
            assert_eq!(
                LunarDate::new(ly, lm, ld),
                convert_solar_to_lunar(d, m, y, 7.0),
                "{y:04}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn late_new_moon_gives_day_zero() {
        assert_eq!(LunarDate::new(2054, Common(3), 29), convert_solar_to_lunar(6, 5, 2054, 7.0));
        assert_eq!(LunarDate::new(2054, Common(4), 0), convert_solar_to_lunar(7, 5, 2054, 7.0));
        assert_eq!(LunarDate::new(2054, Common(4), 1), convert_solar_to_lunar(8, 5, 2054, 7.0));
    }

    #[test]
    fn checked_matches_unchecked() {
        let converter = Converter::default();
        assert_eq!(
            Ok(convert_solar_to_lunar(18, 9, 2022, 7.0)),
            converter.checked_lunar_date(2022, 9, 18)
        );
        assert_eq!(
            Err(CalendarError::InvalidUtcOffset { hours: 30.0 }),
            Converter::new(UtcOffset(30.0)).checked_lunar_date(2022, 9, 18)
        );
        assert_eq!(
            Err(CalendarError::DroppedByReform { day: 5 }),
            converter.checked_lunar_date(1582, 10, 5)
        );
    }

    #[test]
    fn to_solar() {
        let converter = Converter::default();
        for ((ly, lm, ld), expected) in [
            ((2023, Leap(2), 1), Ok("2023-03-22")),
            ((2023, Common(2), 29), Ok("2023-03-20")),
            ((2023, Common(2), 30), Ok("2023-03-21")),
            ((2023, Common(3), 1), Ok("2023-04-20")),
            ((2016, Common(11), 1), Ok("2016-11-29")),
            ((2016, Common(12), 30), Ok("2017-01-27")),
            ((2017, Common(11), 1), Ok("2017-12-18")),
            ((1999, Common(11), 25), Ok("2000-01-01")),
            ((2022, Leap(4), 1), Err(())),
            ((2017, Common(10), 31), Err(())),
            ((2017, Common(1), 0), Err(())),
        ] {
            let lunar = LunarDate::new(ly, lm, ld);
            assert_eq!(
                expected.map(str::to_owned),
                converter
                    .solar_date(lunar)
                    .map(|date| date.iso_gregorian())
                    .map_err(|_| ()),
                "{ly}-{lm}-{ld}"
            );
        }
    }

    #[test]
    fn labels() {
        assert_eq!("23/8", LunarDate::new(2022, Common(8), 23).to_string());
        assert_eq!("1/4+", LunarDate::new(2020, Leap(4), 1).to_string());
    }

    #[test]
    fn converter_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + Copy>() {}
        assert_impl::<Converter>();
    }
}
