//! An iOS-style date picker for [`egui`](https://github.com/emilk/egui).
//!
//! The picker is a button that opens a drawer with three rotating wheels: day, month and year.
//! Each wheel snaps its nearest row to the center when you let go of it, and the three wheels
//! together always describe a valid calendar date (picking February clamps the 31st to the 28th).
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! # let mut birthday: Option<chrono::NaiveDate> = None;
//! use egui_wheel_picker::{WheelDatePicker, YearRange};
//!
//! ui.add(WheelDatePicker::new(&mut birthday).year_range(YearRange::span(100)));
//! # });
//! ```
//!
//! The building blocks are public too:
//! * [`WheelSelector`]: a single snapping wheel of integers.
//! * [`DatePickerState`]: the headless state machine behind the picker.
//! * [`DateField`]: the picker inside a validated form field.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

mod date;
mod error;
mod form;
mod wheel;

pub use crate::date::{
    CloseReason, DatePickerState, PickerOptions, WheelDatePicker, YearRange, days_in_month,
    is_leap_year, month_label,
};
pub use crate::error::Error;
pub use crate::form::{DateField, DateFieldState, DateRule, ValidationError, validate};
pub use crate::wheel::{Debouncer, SETTLE_DEBOUNCE, WheelLength, WheelMotion, WheelSelector};
