use std::ops::RangeInclusive;

use chrono::{Datelike as _, NaiveDate};

use crate::{Error, WheelLength};

/// Which years the year wheel offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum YearRange {
    /// The current year and this many years before it.
    Span(u32),

    /// Exactly these years.
    Explicit { start: i32, end: i32 },
}

impl Default for YearRange {
    /// The current year and the 25 before it.
    fn default() -> Self {
        Self::Span(25)
    }
}

impl From<u32> for YearRange {
    fn from(span: u32) -> Self {
        Self::Span(span)
    }
}

impl TryFrom<RangeInclusive<i32>> for YearRange {
    type Error = Error;

    fn try_from(years: RangeInclusive<i32>) -> Result<Self, Self::Error> {
        Self::explicit(years)
    }
}

impl YearRange {
    /// The current year and `years` years before it.
    pub fn span(years: u32) -> Self {
        Self::Span(years)
    }

    /// Exactly the years in `years`.
    ///
    /// # Errors
    /// [`Error::InvertedRange`] if the range runs backwards.
    pub fn explicit(years: RangeInclusive<i32>) -> Result<Self, Error> {
        let (start, end) = years.into_inner();
        if start > end {
            return Err(Error::InvertedRange { start, end });
        }
        Ok(Self::Explicit { start, end })
    }

    /// The concrete year wheel, given the current year.
    ///
    /// # Errors
    /// [`Error::InvertedRange`] for a backwards explicit range,
    /// [`Error::YearOutOfRange`] if a bound can not be a calendar year.
    pub fn resolve(self, current_year: i32) -> Result<WheelLength, Error> {
        let (start, end) = match self {
            Self::Span(years) => {
                let years = i32::try_from(years).unwrap_or(i32::MAX);
                let start = current_year
                    .checked_sub(years)
                    .ok_or(Error::YearOutOfRange(i32::MIN))?;
                (start, current_year)
            }
            Self::Explicit { start, end } => (start, end),
        };
        for year in [start, end] {
            if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
                return Err(Error::YearOutOfRange(year));
            }
        }
        WheelLength::range(start, end)
    }
}
