mod debounce;
mod length;
mod motion;
mod selector;

pub use debounce::{Debouncer, SETTLE_DEBOUNCE};
pub use length::WheelLength;
pub use motion::WheelMotion;
pub use selector::WheelSelector;
