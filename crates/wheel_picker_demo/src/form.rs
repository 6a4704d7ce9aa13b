use chrono::NaiveDate;
use egui::Ui;
use egui_wheel_picker::{DateField, DateFieldState, DateRule, PickerOptions};

const RULES: [DateRule; 1] = [DateRule::Required];

/// A form with one required date and a submit button.
pub struct DateForm {
    field: DateFieldState,
    options: PickerOptions,
}

impl DateForm {
    pub fn new(options: PickerOptions) -> Self {
        Self {
            field: DateFieldState::default(),
            options,
        }
    }

    /// Returns the date when a valid form is submitted.
    pub fn ui(&mut self, ui: &mut Ui) -> Option<NaiveDate> {
        ui.add(
            DateField::new("Date", &mut self.field)
                .rules(&RULES)
                .options(self.options.clone()),
        );
        ui.weak("The date you will remember forever.");
        ui.add_space(8.0);

        if !ui.button("Submit").clicked() {
            return None;
        }

        match self.field.validate(&RULES) {
            Ok(date) => {
                log::info!("Submitted {date}");
                Some(date)
            }
            Err(err) => {
                log::debug!("Rejected submission: {err}");
                // The message goes above the button, which is already laid out.
                ui.ctx().request_repaint();
                None
            }
        }
    }
}
