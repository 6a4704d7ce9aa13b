use chrono::{Datelike as _, NaiveDate};

use crate::Error;

/// Gregorian leap year: every fourth year, except centuries not divisible by 400.
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (`1..=12`) of `year`.
///
/// Months outside `1..=12` are clamped into it.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        0 | 1 | 3 | 5 | 7 | 8 | 10 | 12.. => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
    }
}

/// Full name of `month` in `year`, e.g. `"February"`.
///
/// # Errors
/// [`Error::InvalidMonth`] or [`Error::YearOutOfRange`].
pub fn month_label(year: i32, month: u32) -> Result<String, Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::YearOutOfRange(year))?;
    Ok(first.format("%B").to_string())
}

/// `date` moved to `month`, with the day clamped to the length of that month.
pub(crate) fn with_month(date: NaiveDate, month: u32) -> Result<NaiveDate, Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth(month));
    }
    rebuild(date.year(), month, date.day())
}

/// `date` moved to `year`, with the day clamped to the length of its month in that year.
pub(crate) fn with_year(date: NaiveDate, year: i32) -> Result<NaiveDate, Error> {
    rebuild(year, date.month(), date.day())
}

fn rebuild(year: i32, month: u32, day: u32) -> Result<NaiveDate, Error> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::YearOutOfRange(year))
}
