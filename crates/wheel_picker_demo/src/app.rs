use chrono::{NaiveDate, NaiveTime};
use egui::{Align, Layout, RichText};

use crate::{DateForm, DemoConfig, Toasts, metadata};

const LINKS: [(&str, &str); 3] = [
    (
        "iOS Date Picker",
        "https://ios-date-picker-shadcn-ui.vercel.app/",
    ),
    ("GitHub", "https://github.com/sahandsn/ios-date-picker-shadcn-ui"),
    ("LinkedIn", "https://www.linkedin.com/in/sahand-sanaei/"),
];

/// The whole demo: a heading, the date form, a footer and toasts.
pub struct DemoApp {
    form: DateForm,
    toasts: Toasts,
}

impl DemoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &DemoConfig) -> Self {
        log::debug!("Starting with {config:?}");
        cc.egui_ctx.options_mut(|options| options.fallback_theme = egui::Theme::Light);

        Self {
            form: DateForm::new(config.picker_options()),
            toasts: Toasts::default(),
        }
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }
}

impl eframe::App for DemoApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading(RichText::new(metadata::TITLE).strong());
                ui.add_space(16.0);
            });

            if let Some(date) = self.form.ui(ui) {
                self.toasts
                    .add("You submitted the following date", submitted_at(date));
            }

            ui.with_layout(Layout::bottom_up(Align::Center), footer);
        });

        self.toasts.show(ui.ctx());
    }
}

/// The submitted date, as local midnight in the `%c` date-time style.
fn submitted_at(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).format("%c").to_string()
}

fn footer(ui: &mut egui::Ui) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        for (i, (text, url)) in LINKS.into_iter().enumerate() {
            if i > 0 {
                ui.weak("·");
            }
            ui.hyperlink_to(text, url);
        }
    });
}
