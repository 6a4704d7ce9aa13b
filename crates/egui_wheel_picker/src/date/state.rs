use chrono::{Datelike as _, NaiveDate};

use super::{days_in_month, with_month, with_year};
use crate::{Error, WheelLength};

/// Why the picker closed. Both commit the pending date the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The confirm button was clicked.
    Confirm,

    /// Somewhere outside the drawer was clicked.
    OutsideClick,
}

/// The headless state machine behind [`crate::WheelDatePicker`].
///
/// It is either closed or open. Opening seeds a *pending* date from the committed value
/// (or today), the wheels edit the pending date, and closing commits it.
/// There is no way to close without committing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatePickerState {
    open: bool,
    pending: NaiveDate,

    /// Once opened, the trigger shows the pending date instead of the committed one.
    has_opened: bool,

    /// The committed value as last seen from the host.
    last_external: Option<NaiveDate>,
}

impl DatePickerState {
    pub fn new(external: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            open: false,
            pending: external.unwrap_or(today),
            has_opened: false,
            last_external: external,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn has_opened(&self) -> bool {
        self.has_opened
    }

    /// The date the wheels are showing.
    pub fn pending(&self) -> NaiveDate {
        self.pending
    }

    /// Closed → open. Seeds the pending date from `external`, or `today` if there is none.
    ///
    /// Does nothing if already open.
    pub fn open(&mut self, external: Option<NaiveDate>, today: NaiveDate) {
        if self.open {
            return;
        }
        self.pending = external.unwrap_or(today);
        self.last_external = external;
        self.open = true;
        self.has_opened = true;
    }

    /// Open → closed, handing out the date to commit.
    ///
    /// Returns `None` if the picker wasn't open.
    pub fn close(&mut self, reason: CloseReason) -> Option<NaiveDate> {
        if !self.open {
            return None;
        }
        log::debug!("date picker closed ({reason:?}), committing {}", self.pending);
        self.open = false;
        self.last_external = Some(self.pending);
        Some(self.pending)
    }

    /// Tell the state what the host's committed value is this frame.
    ///
    /// A new value from the host (that isn't our own pending date coming back)
    /// makes the trigger show the host's value again.
    pub fn observe_external(&mut self, external: Option<NaiveDate>) {
        if external == self.last_external {
            return;
        }
        self.last_external = external;
        if !self.open && external != Some(self.pending) {
            self.has_opened = false;
            if let Some(external) = external {
                self.pending = external;
            }
        }
    }

    /// What the trigger button shows: the live pending date once the picker has been opened,
    /// otherwise the host's value.
    pub fn display(&self, external: Option<NaiveDate>) -> Option<NaiveDate> {
        if self.has_opened {
            Some(self.pending)
        } else {
            external
        }
    }

    /// The day wheel: `1..=` the length of the pending month.
    pub fn day_length(&self) -> WheelLength {
        WheelLength::Count(days_in_month(self.pending.year(), self.pending.month()))
    }

    /// Move the pending year onto the year wheel, clamping the 29th of February if needed.
    pub fn clamp_year(&mut self, years: WheelLength) {
        let year = years.clamp(self.pending.year());
        if year != self.pending.year()
            && let Ok(date) = with_year(self.pending, year)
        {
            self.pending = date;
        }
    }

    /// Pick a day of the pending month. Clamped to the month, which the day wheel already is.
    pub fn set_day(&mut self, day: u32) {
        let day = day.clamp(1, days_in_month(self.pending.year(), self.pending.month()));
        if let Some(date) = self.pending.with_day(day) {
            self.pending = date;
        }
    }

    /// Pick a month, clamping the day if the new month is shorter.
    ///
    /// # Errors
    /// [`Error::InvalidMonth`] outside `1..=12`. The pending date is left as it was.
    pub fn set_month(&mut self, month: u32) -> Result<(), Error> {
        self.pending = with_month(self.pending, month)?;
        Ok(())
    }

    /// Pick a year, clamping the 29th of February if needed.
    ///
    /// # Errors
    /// [`Error::YearOutOfRange`]. The pending date is left as it was.
    pub fn set_year(&mut self, year: i32) -> Result<(), Error> {
        self.pending = with_year(self.pending, year)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn opening_without_a_value_seeds_today() {
        let mut state = DatePickerState::new(None, today());
        assert!(!state.is_open());
        state.open(None, today());
        assert!(state.is_open());
        assert_eq!(state.pending(), today());
    }

    #[test]
    fn opening_with_a_value_seeds_it() {
        let mut state = DatePickerState::new(None, today());
        state.open(Some(date(1999, 12, 31)), today());
        assert_eq!(state.pending(), date(1999, 12, 31));
    }

    #[test]
    fn april_30_to_february_clamps_to_the_28th() {
        let mut state = DatePickerState::new(Some(date(2023, 4, 30)), today());
        state.open(Some(date(2023, 4, 30)), today());
        state.set_month(2).unwrap();
        assert_eq!(state.pending(), date(2023, 2, 28));
        assert_eq!(state.day_length(), WheelLength::Count(28));
    }

    #[test]
    fn clamped_day_is_not_restored() {
        let mut state = DatePickerState::new(Some(date(2024, 1, 31)), today());
        state.open(Some(date(2024, 1, 31)), today());
        state.set_month(4).unwrap();
        assert_eq!(state.pending(), date(2024, 4, 30));
        state.set_month(5).unwrap();
        assert_eq!(state.pending(), date(2024, 5, 30), "last day wins");
    }

    #[test]
    fn changing_year_clamps_leap_day() {
        let mut state = DatePickerState::new(Some(date(2024, 2, 29)), today());
        state.open(Some(date(2024, 2, 29)), today());
        state.set_year(2023).unwrap();
        assert_eq!(state.pending(), date(2023, 2, 28));
        state.set_year(2024).unwrap();
        assert_eq!(state.pending(), date(2024, 2, 28));
    }

    #[test]
    fn day_changes_stay_in_the_month() {
        let mut state = DatePickerState::new(Some(date(2023, 2, 10)), today());
        state.open(Some(date(2023, 2, 10)), today());
        state.set_day(20);
        assert_eq!(state.pending(), date(2023, 2, 20));
        state.set_day(31);
        assert_eq!(state.pending(), date(2023, 2, 28));
    }

    #[test]
    fn pending_year_is_kept_on_the_year_wheel() {
        let mut state = DatePickerState::new(None, date(2024, 2, 29));
        state.open(None, date(2024, 2, 29));
        state.clamp_year(WheelLength::Range {
            start: 1990,
            end: 2001,
        });
        assert_eq!(state.pending(), date(2001, 2, 28));

        state.clamp_year(WheelLength::Range {
            start: 2010,
            end: 2020,
        });
        assert_eq!(state.pending(), date(2010, 2, 28));

        state.clamp_year(WheelLength::Range {
            start: 2000,
            end: 2030,
        });
        assert_eq!(state.pending(), date(2010, 2, 28), "already on the wheel");
    }

    #[test]
    fn invalid_input_leaves_the_date_alone() {
        let mut state = DatePickerState::new(Some(date(2023, 2, 10)), today());
        assert_eq!(state.set_month(13), Err(Error::InvalidMonth(13)));
        assert_eq!(
            state.set_year(i32::MIN),
            Err(Error::YearOutOfRange(i32::MIN))
        );
        assert_eq!(state.pending(), date(2023, 2, 10));
    }

    #[test]
    fn confirm_and_outside_click_commit_the_same_date() {
        let commit = |reason| {
            let mut state = DatePickerState::new(None, today());
            state.open(None, today());
            state.set_month(2).unwrap();
            state.set_day(29);
            let committed = state.close(reason);
            assert!(!state.is_open());
            committed
        };
        assert_eq!(commit(CloseReason::Confirm), Some(date(2024, 2, 29)));
        assert_eq!(
            commit(CloseReason::Confirm),
            commit(CloseReason::OutsideClick)
        );
    }

    #[test]
    fn closing_twice_commits_once() {
        let mut state = DatePickerState::new(None, today());
        state.open(None, today());
        assert!(state.close(CloseReason::Confirm).is_some());
        assert_eq!(state.close(CloseReason::OutsideClick), None);
    }

    #[test]
    fn display_follows_the_host_until_first_opened() {
        let mut state = DatePickerState::new(None, today());
        assert_eq!(state.display(None), None);
        assert_eq!(state.display(Some(date(2000, 1, 1))), Some(date(2000, 1, 1)));

        state.open(None, today());
        state.set_day(20);
        // Still open, nothing committed, but the trigger already follows the wheels:
        assert_eq!(state.display(None), Some(date(2024, 6, 20)));

        let committed = state.close(CloseReason::Confirm);
        state.observe_external(committed);
        assert!(state.has_opened(), "our own value coming back changes nothing");
        assert_eq!(state.display(committed), Some(date(2024, 6, 20)));
    }

    #[test]
    fn new_host_value_resets_the_display() {
        let mut state = DatePickerState::new(None, today());
        state.open(None, today());
        let committed = state.close(CloseReason::Confirm);
        state.observe_external(committed);

        state.observe_external(Some(date(2010, 10, 10)));
        assert!(!state.has_opened());
        assert_eq!(
            state.display(Some(date(2010, 10, 10))),
            Some(date(2010, 10, 10))
        );

        state.observe_external(None);
        assert_eq!(state.display(None), None, "host cleared the value");
    }
}
