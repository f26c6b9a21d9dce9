//! Conversion from solar (Gregorian) dates into the Vietnamese lunisolar
//! calendar, âm lịch.
//!
//! Months and leap months are derived from new moon and solar longitude
//! series evaluated at a given time zone, following the algorithm widely used
//! for Vietnamese calendars. Validated entry points accept years within
//! [`SUPPORTED_YEARS`](date::SUPPORTED_YEARS).
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use amlich::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1);
//!
//! assert_eq!(2451545, date.jdn());
//! assert_eq!("2000-01-01", date.iso_gregorian());
//! ```
//!
//! Lunisolar calendar:
//!
//! ```
//! use amlich::{Converter, Date};
//! use amlich::vietnamese::{LunarDate, Month::*};
//!
//! let converter = Converter::default(); // UTC+7
//! let lunar = converter.lunar_date(Date::from_gregorian(2020, 5, 23));
//!
//! assert_eq!(LunarDate::new(2020, Leap(4), 1), lunar);
//! assert!(lunar.is_leap_month());
//! ```
//!
//! The plain-number entry point:
//!
//! ```
//! use amlich::convert_solar_to_lunar;
//!
//! let lunar = convert_solar_to_lunar(18, 9, 2022, 7.0);
//! assert_eq!("23/8", lunar.to_string());
//! ```
//!
//! # Features
//!
//! - `chrono`: conversions between [`Date`] and `chrono::NaiveDate`
//! - `serde`: `Serialize`/`Deserialize` for the public value types
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade.

pub mod date;
pub mod error;
pub mod time_scales;
pub mod vietnamese;

pub use date::{Date, SUPPORTED_YEARS, YearType};
pub use error::CalendarError;
pub use time_scales::UtcOffset;
pub use vietnamese::{Converter, LunarDate, Month, convert_solar_to_lunar};
