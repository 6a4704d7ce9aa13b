//! Demo app for [`egui_wheel_picker`]: a form with one required date.

mod app;
mod config;
mod form;
pub mod metadata;
mod toasts;

pub use app::DemoApp;
pub use config::{DemoConfig, PUBLIC_URL_VAR, TODAY_VAR, YEAR_SPAN_VAR};
pub use form::DateForm;
pub use toasts::{Toast, Toasts};
