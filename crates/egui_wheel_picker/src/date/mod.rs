mod calendar;
mod picker;
mod state;
mod year_range;

pub use calendar::{days_in_month, is_leap_year, month_label};
pub use picker::{PickerOptions, WheelDatePicker};
pub use state::{CloseReason, DatePickerState};
pub use year_range::YearRange;

pub(crate) use calendar::{with_month, with_year};
