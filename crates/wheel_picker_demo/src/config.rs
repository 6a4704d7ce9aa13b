use chrono::NaiveDate;
use egui::Vec2;
use egui_wheel_picker::{PickerOptions, YearRange};

use crate::metadata::{self, BaseUrl, MetadataError};

/// Where the demo is published. Needed for `--metadata` and `--sitemap`.
pub const PUBLIC_URL_VAR: &str = "PUBLIC_URL";

/// How many years back the year wheel goes.
pub const YEAR_SPAN_VAR: &str = "WHEEL_PICKER_YEAR_SPAN";

/// Pretend today is this `YYYY-MM-DD` date. Handy for screenshots.
pub const TODAY_VAR: &str = "WHEEL_PICKER_TODAY";

/// Runtime settings of the demo.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    /// Unparsed, so a bad value is reported where it is used.
    pub public_url: Option<String>,
    pub year_span: u32,
    pub today: Option<NaiveDate>,
    pub window_size: Vec2,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            public_url: None,
            year_span: 25,
            today: None,
            window_size: Vec2::new(480.0, 640.0),
        }
    }
}

impl DemoConfig {
    /// Read [`PUBLIC_URL_VAR`], [`YEAR_SPAN_VAR`] and [`TODAY_VAR`].
    ///
    /// Values that don't parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], but with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            public_url: lookup(PUBLIC_URL_VAR).filter(|url| !url.trim().is_empty()),
            ..Self::default()
        };

        if let Some(span) = lookup(YEAR_SPAN_VAR) {
            match span.trim().parse() {
                Ok(span) => config.year_span = span,
                Err(err) => log::warn!("Ignoring {YEAR_SPAN_VAR}={span:?}: {err}"),
            }
        }

        if let Some(today) = lookup(TODAY_VAR) {
            match NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d") {
                Ok(today) => config.today = Some(today),
                Err(err) => log::warn!("Ignoring {TODAY_VAR}={today:?}: {err}"),
            }
        }

        config
    }

    /// # Errors
    /// If [`Self::public_url`] is missing or not an absolute `http(s)` URL.
    pub fn base_url(&self) -> Result<BaseUrl, MetadataError> {
        self.public_url
            .as_deref()
            .ok_or(MetadataError::MissingBaseUrl)
            .and_then(BaseUrl::parse)
    }

    /// How the date field's picker is set up.
    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            year_range: YearRange::Span(self.year_span),
            today: self.today,
            ..Default::default()
        }
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(metadata::TITLE)
                .with_inner_size(self.window_size)
                .with_min_inner_size([360.0, 480.0]),
            ..Default::default()
        }
    }
}
