/// Malformed input given when building a wheel or a date picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A wheel must show at least one value.
    #[error("a wheel needs at least one value")]
    EmptyWheel,

    /// A `start..=end` range where `start > end`.
    #[error("inverted wheel range: {start} is after {end}")]
    InvertedRange { start: i32, end: i32 },

    /// Months are numbered `1..=12`.
    #[error("{0} is not a month, expected 1..=12")]
    InvalidMonth(u32),

    /// The year can not be represented as a calendar date.
    #[error("year {0} is outside the supported calendar")]
    YearOutOfRange(i32),
}
