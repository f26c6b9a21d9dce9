//! Day-by-day conversion for calendar views.

use super::{Annus, LunarDate, Month, lunar_date_in, month_start};
use crate::date::Date;
use crate::time_scales::UtcOffset;

/// Iterator over consecutive solar days and their lunar dates, created by
/// [`Converter::lunar_dates`](super::Converter::lunar_dates).
///
/// The month name depends only on the month start and the solar year of the
/// day, so it is computed once per pair; every item equals what
/// [`Converter::lunar_date`](super::Converter::lunar_date) returns.
#[derive(Debug, Clone)]
pub struct LunarDates {
    next: Date,
    offset: UtcOffset,
    named: Option<NamedMonth>,
}

#[derive(Debug, Copy, Clone)]
struct NamedMonth {
    start: Date,
    solar_year: i32,
    lunar_year: i32,
    month: Month,
}

impl LunarDates {
    pub(super) fn new(start: Date, offset: UtcOffset) -> Self {
        Self {
            next: start,
            offset,
            named: None,
        }
    }
}

impl Iterator for LunarDates {
    type Item = (Date, LunarDate);

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next;
        self.next = date + 1;

        let start = month_start(date, self.offset);
        let solar_year = date.gregorian().0;
        let named = match self.named {
            Some(named) if named.start == start && named.solar_year == solar_year => named,
            _ => {
                let (lunar_year, month) =
                    Annus::containing(start, solar_year, self.offset).month_at(start);
                let named = NamedMonth {
                    start,
                    solar_year,
                    lunar_year,
                    month,
                };
                self.named = Some(named);
                named
            }
        };
        Some((date, lunar_date_in(date, start, named.lunar_year, named.month)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl std::iter::FusedIterator for LunarDates {}

#[cfg(test)]
mod tests {
    use crate::date::Date;
    use crate::vietnamese::{Converter, LunarDate, Month::*};

    #[test]
    fn month_view() {
        let converter = Converter::default();
        // 2022-08-29 (Monday) to 2022-10-09 (Sunday): a 42-cell grid for September
        let start = Date::from_gregorian(2022, 8, 29);
        let cells: Vec<_> = converter.lunar_dates(start).take(42).collect();
        assert_eq!(42, cells.len());
        assert_eq!("2022-10-09", cells[41].0.iso_gregorian());
        for (date, lunar) in &cells {
            assert_eq!(converter.lunar_date(*date), *lunar, "{}", date.iso_gregorian());
        }
        assert_eq!(LunarDate::new(2022, Common(8), 3), cells[0].1);
        assert_eq!(LunarDate::new(2022, Common(9), 1), cells[28].1);
    }

    #[test]
    fn across_new_year() {
        let converter = Converter::default();
        let start = Date::from_gregorian(2016, 12, 20);
        for (date, lunar) in converter.lunar_dates(start).take(60) {
            assert_eq!(converter.lunar_date(date), lunar, "{}", date.iso_gregorian());
        }
    }
}
