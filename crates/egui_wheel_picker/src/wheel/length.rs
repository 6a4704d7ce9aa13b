use std::ops::RangeInclusive;

use crate::Error;

/// The values a [`crate::WheelSelector`] can show.
///
/// Either a plain count (`1..=n`) or an explicit inclusive range.
/// Every other query on a wheel goes through [`Self::bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum WheelLength {
    /// The values `1..=n`.
    Count(u32),

    /// The values `start..=end`.
    Range { start: i32, end: i32 },
}

impl WheelLength {
    /// The values `1..=n`.
    ///
    /// # Errors
    /// [`Error::EmptyWheel`] if `n` is zero.
    pub fn count(n: u32) -> Result<Self, Error> {
        Self::Count(n).validate()
    }

    /// The values `start..=end`.
    ///
    /// # Errors
    /// [`Error::InvertedRange`] if `start > end`.
    pub fn range(start: i32, end: i32) -> Result<Self, Error> {
        Self::Range { start, end }.validate()
    }

    /// A wheel with exactly one value.
    pub fn single(value: i32) -> Self {
        Self::Range {
            start: value,
            end: value,
        }
    }

    /// Check a length built directly from its variants.
    ///
    /// # Errors
    /// [`Error::EmptyWheel`] or [`Error::InvertedRange`].
    pub fn validate(self) -> Result<Self, Error> {
        match self {
            Self::Count(0) => Err(Error::EmptyWheel),
            Self::Range { start, end } if start > end => Err(Error::InvertedRange { start, end }),
            Self::Count(_) | Self::Range { .. } => Ok(self),
        }
    }

    /// The values of the wheel, first to last.
    ///
    /// Malformed lengths collapse to their first value.
    pub fn bounds(self) -> RangeInclusive<i32> {
        match self {
            Self::Count(n) => 1..=i32::try_from(n).unwrap_or(i32::MAX).max(1),
            Self::Range { start, end } => start..=end.max(start),
        }
    }

    /// Number of rows on the wheel. Always at least one.
    pub fn len(self) -> usize {
        let bounds = self.bounds();
        let span = i64::from(*bounds.end()) - i64::from(*bounds.start());
        usize::try_from(span).unwrap_or(usize::MAX - 1) + 1
    }

    /// Is this wheel fixed to one value?
    pub fn is_single(self) -> bool {
        self.len() == 1
    }

    /// Clamp a value into the wheel.
    pub fn clamp(self, value: i32) -> i32 {
        let bounds = self.bounds();
        value.clamp(*bounds.start(), *bounds.end())
    }

    pub fn contains(self, value: i32) -> bool {
        self.bounds().contains(&value)
    }

    /// The row of `value`, after clamping it into the wheel.
    pub fn index_of(self, value: i32) -> usize {
        let offset = i64::from(self.clamp(value)) - i64::from(*self.bounds().start());
        usize::try_from(offset).unwrap_or(0)
    }

    /// The value on row `index`, clamped to the last row.
    pub fn value_at(self, index: usize) -> i32 {
        let bounds = self.bounds();
        let index = index.min(self.len() - 1);
        let value = i64::from(*bounds.start()) + i64::try_from(index).unwrap_or(i64::MAX);
        i32::try_from(value).unwrap_or(*bounds.end())
    }
}

impl TryFrom<RangeInclusive<i32>> for WheelLength {
    type Error = Error;

    fn try_from(range: RangeInclusive<i32>) -> Result<Self, Self::Error> {
        Self::range(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_starts_at_one() {
        let length = WheelLength::count(12).unwrap();
        assert_eq!(length.bounds(), 1..=12);
        assert_eq!(length.len(), 12);
        assert_eq!(length.value_at(0), 1);
        assert_eq!(length.value_at(11), 12);
        assert_eq!(length.index_of(1), 0);
    }

    #[test]
    fn range_maps_rows_to_values() {
        let length = WheelLength::range(2019, 2024).unwrap();
        assert_eq!(length.len(), 6);
        assert_eq!(length.value_at(0), 2019);
        assert_eq!(length.value_at(5), 2024);
        assert_eq!(length.index_of(2021), 2);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let length = WheelLength::range(2000, 2010).unwrap();
        assert_eq!(length.clamp(1990), 2000);
        assert_eq!(length.clamp(2030), 2010);
        assert_eq!(length.index_of(1990), 0);
        assert_eq!(length.index_of(2030), 10);
        assert_eq!(length.value_at(99), 2010);
    }

    #[test]
    fn single_value_wheels() {
        assert!(WheelLength::count(1).unwrap().is_single());
        assert!(WheelLength::single(7).is_single());
        assert_eq!(WheelLength::single(7).value_at(3), 7);
    }

    #[test]
    fn malformed_lengths_are_rejected() {
        assert_eq!(WheelLength::count(0), Err(Error::EmptyWheel));
        assert_eq!(
            WheelLength::range(10, 5),
            Err(Error::InvertedRange { start: 10, end: 5 })
        );
        assert_eq!(
            WheelLength::try_from(3..=1),
            Err(Error::InvertedRange { start: 3, end: 1 })
        );
        // Built directly, they still behave like a one-row wheel:
        assert_eq!(WheelLength::Range { start: 10, end: 5 }.len(), 1);
        assert_eq!(WheelLength::Count(0).len(), 1);
    }
}
