use std::time::Duration;

/// How long a wheel waits after settling before it reports its value.
pub const SETTLE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Trailing-edge debouncer driven by an external clock.
///
/// Every [`Self::push`] replaces the held value and restarts the timer.
/// [`Self::poll`] hands out the value once no new push has arrived for the whole delay.
///
/// Time is in seconds, the same unit as [`egui::InputState::time`].
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay: f64,
    pending: Option<Pending<T>>,
}

#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    deadline: f64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SETTLE_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay: delay.as_secs_f64(),
            pending: None,
        }
    }

    /// Hold `value`, replacing whatever was held, and restart the timer from `now`.
    pub fn push(&mut self, value: T, now: f64) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Take the held value if its window has passed.
    pub fn poll(&mut self, now: f64) -> Option<T> {
        if self.pending.as_ref()?.deadline <= now {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    /// Time left until the held value is due, if any.
    pub fn remaining(&self, now: f64) -> Option<Duration> {
        let pending = self.pending.as_ref()?;
        Some(Duration::from_secs_f64((pending.deadline - now).max(0.0)))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the held value without emitting it.
    ///
    /// Returns it, so a caller that is about to go away can still apply it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}
