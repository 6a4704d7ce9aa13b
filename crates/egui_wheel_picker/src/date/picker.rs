use std::hash::Hash;

use chrono::{Datelike as _, Local, NaiveDate};
use egui::{
    Align2, Area, Button, Color32, Context, Frame, Id, InnerResponse, Order, Rect, Response,
    RichText, Shape, Ui, Vec2, Widget, vec2,
};

use super::{CloseReason, DatePickerState, YearRange, month_label};
use crate::{WheelLength, WheelSelector};

const DRAWER_WIDTH: f32 = 400.0;
const ROW_HEIGHT: f32 = 200.0 / 3.0;
const DAY_WIDTH: f32 = 100.0;
const MONTH_WIDTH: f32 = 150.0;
const YEAR_WIDTH: f32 = 100.0;

/// Everything about a [`WheelDatePicker`] except the value it edits.
///
/// Handy when the picker is built by something else, like [`crate::DateField`].
#[derive(Clone, Debug)]
pub struct PickerOptions {
    pub year_range: YearRange,

    /// Shown on the button while there is no date.
    pub placeholder: String,
    pub disabled: bool,

    /// [`chrono::format::strftime`] format for the button.
    pub format: String,
    pub show_icon: bool,
    pub min_width: f32,
    pub fill: Option<Color32>,

    pub title: String,
    pub description: String,
    pub confirm_text: String,

    /// Use this as today's date instead of asking the clock.
    pub today: Option<NaiveDate>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            year_range: YearRange::default(),
            placeholder: "select a date".to_owned(),
            disabled: false,
            format: "%-d %B %Y".to_owned(),
            show_icon: true,
            min_width: 0.0,
            fill: None,
            title: "Select a Date".to_owned(),
            description: "Drag over wheels to select.".to_owned(),
            confirm_text: "Confirm".to_owned(),
            today: None,
        }
    }
}

/// Shows a date, and opens a drawer with day, month and year wheels when clicked.
///
/// The wheels edit a pending date. Clicking "Confirm" or anywhere outside the drawer
/// closes it and writes the pending date to the value, marking the response as changed.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # use egui_wheel_picker::{WheelDatePicker, YearRange};
/// let mut date = None;
/// let response = ui.add(
///     WheelDatePicker::new(&mut date)
///         .id_salt("start_date")
///         .year_range(YearRange::span(10))
///         .placeholder("pick a start date"),
/// );
/// if response.changed() {
///     assert!(date.is_some());
/// }
/// # });
/// ```
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct WheelDatePicker<'a> {
    value: &'a mut Option<NaiveDate>,
    id_salt: Option<Id>,
    options: PickerOptions,
}

impl<'a> WheelDatePicker<'a> {
    pub fn new(value: &'a mut Option<NaiveDate>) -> Self {
        Self {
            value,
            id_salt: None,
            options: PickerOptions::default(),
        }
    }

    /// Must be set if multiple date pickers are in the same [`Ui`].
    #[inline]
    pub fn id_salt(mut self, id_salt: impl Hash) -> Self {
        self.id_salt = Some(Id::new(id_salt));
        self
    }

    /// Replace all options at once.
    #[inline]
    pub fn options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    /// Years offered by the year wheel. (Default: this year and the 25 before it)
    #[inline]
    pub fn year_range(mut self, year_range: impl Into<YearRange>) -> Self {
        self.options.year_range = year_range.into();
        self
    }

    /// Text on the button while there is no date. (Default: "select a date")
    #[inline]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.placeholder = placeholder.into();
        self
    }

    #[inline]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.options.disabled = disabled;
        self
    }

    /// Change the format shown on the button. (Default: `%-d %B %Y`, e.g. "4 July 2024")
    /// See [`chrono::format::strftime`] for valid formats.
    #[inline]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.format = format.into();
        self
    }

    /// Show the calendar icon on the button. (Default: true)
    #[inline]
    pub fn show_icon(mut self, show_icon: bool) -> Self {
        self.options.show_icon = show_icon;
        self
    }

    #[inline]
    pub fn min_width(mut self, min_width: f32) -> Self {
        self.options.min_width = min_width;
        self
    }

    /// Background of the button.
    #[inline]
    pub fn fill(mut self, fill: impl Into<Color32>) -> Self {
        self.options.fill = Some(fill.into());
        self
    }

    /// Heading of the drawer. (Default: "Select a Date")
    #[inline]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    #[inline]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.options.description = description.into();
        self
    }

    #[inline]
    pub fn confirm_text(mut self, confirm_text: impl Into<String>) -> Self {
        self.options.confirm_text = confirm_text.into();
        self
    }

    /// Pretend today is `today`. Mostly for tests and screenshots.
    #[inline]
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.options.today = Some(today);
        self
    }
}

impl Widget for WheelDatePicker<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            value,
            id_salt,
            options,
        } = self;

        let id = ui.make_persistent_id(id_salt);
        let today = options.today.unwrap_or_else(|| Local::now().date_naive());

        let mut state = ui
            .data(|data| data.get_temp::<DatePickerState>(id))
            .unwrap_or_else(|| DatePickerState::new(*value, today));
        state.observe_external(*value);

        let mut response = trigger_button(ui, &options, state.display(*value), state.is_open());
        if response.clicked() && !state.is_open() {
            state.open(*value, today);
            state.clamp_year(year_length(options.year_range, today, state.pending()));
            log::debug!("date picker {id:?} opened on {}", state.pending());
        }

        if state.is_open() {
            let wheels = WheelIds::new(id);
            let InnerResponse {
                inner: confirmed,
                response: drawer,
            } = show_drawer(ui.ctx(), id, &options, &mut state, wheels, today);

            let reason = if confirmed {
                Some(CloseReason::Confirm)
            } else if !response.clicked() && drawer.clicked_elsewhere() {
                Some(CloseReason::OutsideClick)
            } else {
                None
            };

            if let Some(reason) = reason {
                wheels.flush_into(ui.ctx(), &mut state);
                wheels.forget(ui.ctx());
                if let Some(date) = state.close(reason) {
                    *value = Some(date);
                    response.mark_changed();
                }
            }
        }

        ui.data_mut(|data| data.insert_temp(id, state));

        response
    }
}

fn trigger_button(
    ui: &mut Ui,
    options: &PickerOptions,
    shown: Option<NaiveDate>,
    open: bool,
) -> Response {
    let text = shown.map_or_else(
        || options.placeholder.clone(),
        |date| date.format(&options.format).to_string(),
    );
    let text = if options.show_icon {
        format!("📆 {text}")
    } else {
        text
    };
    let mut text = RichText::new(text);
    if shown.is_none() {
        text = text.color(ui.visuals().weak_text_color());
    }

    let mut button = Button::new(text).min_size(vec2(options.min_width, 0.0));
    if let Some(fill) = options.fill {
        button = button.fill(fill);
    }
    if open {
        let visuals = ui.visuals().widgets.open;
        button = button.fill(visuals.weak_bg_fill).stroke(visuals.bg_stroke);
    }
    ui.add_enabled(!options.disabled, button)
}

/// Returns `true` if the confirm button was clicked.
fn show_drawer(
    ctx: &Context,
    id: Id,
    options: &PickerOptions,
    state: &mut DatePickerState,
    wheels: WheelIds,
    today: NaiveDate,
) -> InnerResponse<bool> {
    Area::new(id.with("drawer"))
        .order(Order::Foreground)
        .anchor(Align2::CENTER_BOTTOM, Vec2::ZERO)
        .show(ctx, |ui| {
            Frame::popup(ui.style())
                .show(ui, |ui| {
                    ui.set_width(DRAWER_WIDTH);

                    ui.vertical_centered(|ui| {
                        ui.heading(&options.title);
                        ui.weak(&options.description);
                    });
                    ui.add_space(8.0);

                    show_wheels(ui, state, options.year_range, wheels, today);

                    ui.add_space(8.0);
                    ui.add_sized(
                        [ui.available_width(), 28.0],
                        Button::new(options.confirm_text.as_str()),
                    )
                    .clicked()
                })
                .inner
        })
}

fn show_wheels(
    ui: &mut Ui,
    state: &mut DatePickerState,
    year_range: YearRange,
    wheels: WheelIds,
    today: NaiveDate,
) {
    let years = year_length(year_range, today, state.pending());
    state.clamp_year(years);

    let pending = state.pending();

    let mut day = pending.day() as i32;
    let mut month = pending.month() as i32;
    let mut year = pending.year();
    let label_year = pending.year();

    // The band marking the selected row goes behind the wheels:
    let band = ui.painter().add(Shape::Noop);

    let row = ui.horizontal(|ui| {
        let wheels_width = DAY_WIDTH + MONTH_WIDTH + YEAR_WIDTH + 2.0 * ui.spacing().item_spacing.x;
        ui.add_space(((ui.available_width() - wheels_width) / 2.0).max(0.0));

        let day_changed = ui
            .add(
                WheelSelector::new(&mut day, state.day_length())
                    .id(wheels.day)
                    .width(DAY_WIDTH)
                    .row_height(ROW_HEIGHT),
            )
            .changed();
        let month_changed = ui
            .add(
                WheelSelector::new(&mut month, WheelLength::Count(12))
                    .id(wheels.month)
                    .width(MONTH_WIDTH)
                    .row_height(ROW_HEIGHT)
                    .formatter(move |month| {
                        month_label(label_year, month as u32).unwrap_or_else(|_| month.to_string())
                    }),
            )
            .changed();
        let year_changed = ui
            .add(
                WheelSelector::new(&mut year, years)
                    .id(wheels.year)
                    .width(YEAR_WIDTH)
                    .row_height(ROW_HEIGHT),
            )
            .changed();
        (day_changed, month_changed, year_changed)
    });

    let rect = row.response.rect;
    ui.painter().set(
        band,
        Shape::rect_filled(
            Rect::from_center_size(rect.center(), vec2(rect.width(), ROW_HEIGHT)),
            6.0,
            ui.visuals().faint_bg_color,
        ),
    );

    let (day_changed, month_changed, year_changed) = row.inner;
    if day_changed {
        state.set_day(day as u32);
    }
    if month_changed && let Err(err) = state.set_month(month as u32) {
        log::warn!("ignoring month wheel: {err}");
    }
    if year_changed && let Err(err) = state.set_year(year) {
        log::warn!("ignoring year wheel: {err}");
    }
}

/// The year wheel. A bad range falls back to just the pending year.
fn year_length(year_range: YearRange, today: NaiveDate, pending: NaiveDate) -> WheelLength {
    year_range.resolve(today.year()).unwrap_or_else(|err| {
        log::warn!("{err}; the year wheel only shows {}", pending.year());
        WheelLength::single(pending.year())
    })
}

/// Where the three wheels of one picker keep their memory.
#[derive(Clone, Copy, Debug)]
struct WheelIds {
    day: Id,
    month: Id,
    year: Id,
}

impl WheelIds {
    fn new(picker: Id) -> Self {
        Self {
            day: picker.with("day_wheel"),
            month: picker.with("month_wheel"),
            year: picker.with("year_wheel"),
        }
    }

    /// Apply values the wheels settled on but haven't reported yet,
    /// so confirming right after a flick doesn't lose it.
    fn flush_into(self, ctx: &Context, state: &mut DatePickerState) {
        // Year and month first, so the day is clamped against the final month.
        if let Some(year) = WheelSelector::flush(ctx, self.year)
            && let Err(err) = state.set_year(year)
        {
            log::warn!("ignoring year wheel: {err}");
        }
        if let Some(month) = WheelSelector::flush(ctx, self.month)
            && let Err(err) = state.set_month(month as u32)
        {
            log::warn!("ignoring month wheel: {err}");
        }
        if let Some(day) = WheelSelector::flush(ctx, self.day) {
            state.set_day(day as u32);
        }
    }

    fn forget(self, ctx: &Context) {
        for id in [self.day, self.month, self.year] {
            WheelSelector::forget(ctx, id);
        }
    }
}
