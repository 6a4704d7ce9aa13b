//! A [`WheelDatePicker`] inside a form field with a label and a validation message.

use chrono::NaiveDate;
use egui::{Response, RichText, Ui, Widget};

use crate::{PickerOptions, WheelDatePicker};

/// One validation rule for a date field.
#[derive(Clone, Copy, Debug)]
pub enum DateRule {
    /// There must be a date.
    Required,

    /// The date must be on or after this one.
    NotBefore(NaiveDate),

    /// The date must be on or before this one.
    NotAfter(NaiveDate),

    /// Any other check. Return the message to show on failure.
    Custom(fn(NaiveDate) -> Result<(), String>),
}

/// Why a date field is invalid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required")]
    Required,

    #[error("Date must be on or after {0}")]
    TooEarly(NaiveDate),

    #[error("Date must be on or before {0}")]
    TooLate(NaiveDate),

    #[error("{0}")]
    Custom(String),
}

/// Check `value` against every rule, in order.
///
/// An empty value only fails [`DateRule::Required`]; without it, "no date" is valid
/// but there is nothing to return, so it still comes back as [`ValidationError::Required`].
///
/// # Errors
/// The first rule that fails.
pub fn validate(value: Option<NaiveDate>, rules: &[DateRule]) -> Result<NaiveDate, ValidationError> {
    let Some(date) = value else {
        return Err(ValidationError::Required);
    };
    for rule in rules {
        match *rule {
            DateRule::Required => {}
            DateRule::NotBefore(min) if date < min => return Err(ValidationError::TooEarly(min)),
            DateRule::NotAfter(max) if max < date => return Err(ValidationError::TooLate(max)),
            DateRule::NotBefore(_) | DateRule::NotAfter(_) => {}
            DateRule::Custom(check) => check(date).map_err(ValidationError::Custom)?,
        }
    }
    Ok(date)
}

/// What a form keeps for one date field between frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DateFieldState {
    pub value: Option<NaiveDate>,

    /// Shown under the picker. Set by [`Self::validate`], not persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub error: Option<ValidationError>,
}

impl DateFieldState {
    pub fn new(value: Option<NaiveDate>) -> Self {
        Self { value, error: None }
    }

    /// Validate the current value, remembering the message to show.
    ///
    /// # Errors
    /// The first rule that fails.
    pub fn validate(&mut self, rules: &[DateRule]) -> Result<NaiveDate, ValidationError> {
        let result = validate(self.value, rules);
        self.error = result.as_ref().err().cloned();
        result
    }
}

/// A labelled [`WheelDatePicker`] that shows its validation message.
///
/// Validation runs when the form asks for it ([`DateFieldState::validate`], usually on submit).
/// After that, the field re-validates every time the picker commits a new date.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct DateField<'a> {
    label: &'a str,
    state: &'a mut DateFieldState,
    rules: &'a [DateRule],
    options: PickerOptions,
}

impl<'a> DateField<'a> {
    pub fn new(label: &'a str, state: &'a mut DateFieldState) -> Self {
        Self {
            label,
            state,
            rules: &[],
            options: PickerOptions::default(),
        }
    }

    #[inline]
    pub fn rules(mut self, rules: &'a [DateRule]) -> Self {
        self.rules = rules;
        self
    }

    /// How the picker inside the field looks and behaves.
    #[inline]
    pub fn options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }
}

impl Widget for DateField<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            label,
            state,
            rules,
            options,
        } = self;

        ui.vertical(|ui| {
            let error_color = ui.visuals().error_fg_color;

            let mut label_text = RichText::new(label).strong();
            if state.error.is_some() {
                label_text = label_text.color(error_color);
            }
            let label_response = ui.label(label_text);

            let response = ui
                .add(
                    WheelDatePicker::new(&mut state.value)
                        .id_salt(label)
                        .options(options),
                )
                .labelled_by(label_response.id);

            if response.changed() && state.error.is_some() {
                let _ = state.validate(rules);
            }

            if let Some(error) = &state.error {
                ui.colored_label(error_color, error.to_string());
            }

            response
        })
        .inner
    }
}
