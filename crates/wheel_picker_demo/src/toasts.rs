//! Short-lived notifications in the corner of the screen.

use std::time::Duration;

use egui::{Align2, Area, Context, Frame, Id, Order, RichText, Vec2};

/// One notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,

    id: u64,

    /// [`egui::InputState::time`] when first shown.
    shown_at: Option<f64>,
}

/// A stack of [`Toast`]s anchored at the bottom right, newest at the bottom.
///
/// Each expires on its own, or when its close button is clicked.
#[derive(Clone, Debug)]
pub struct Toasts {
    toasts: Vec<Toast>,
    next_id: u64,
    lifetime: f64,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIFETIME)
    }
}

impl Toasts {
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(5);

    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            lifetime: lifetime.as_secs_f64(),
        }
    }

    /// The clock starts when the toast is first shown.
    pub fn add(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.toasts.push(Toast {
            title: title.into(),
            description: description.into(),
            id: self.next_id,
            shown_at: None,
        });
        self.next_id += 1;
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Start the clock on new toasts and drop expired ones.
    ///
    /// Returns how long until the next one expires.
    fn expire(&mut self, now: f64) -> Option<Duration> {
        let lifetime = self.lifetime;
        for toast in &mut self.toasts {
            toast.shown_at.get_or_insert(now);
        }
        self.toasts
            .retain(|toast| toast.shown_at.is_some_and(|shown_at| now - shown_at < lifetime));
        self.toasts
            .iter()
            .filter_map(|toast| toast.shown_at)
            .map(|shown_at| shown_at + lifetime - now)
            .reduce(f64::min)
            .map(|remaining| Duration::from_secs_f64(remaining.max(0.0)))
    }

    pub fn show(&mut self, ctx: &Context) {
        let now = ctx.input(|i| i.time);
        let Some(next_expiry) = self.expire(now) else {
            return;
        };
        ctx.request_repaint_after(next_expiry);

        let mut closed = None;
        Area::new(Id::new("toasts"))
            .order(Order::Tooltip)
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-12.0, -12.0))
            .show(ctx, |ui| {
                ui.set_max_width(320.0);
                for toast in &self.toasts {
                    Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal_top(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&toast.title).strong());
                                ui.label(&toast.description);
                            });
                            if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                                closed = Some(toast.id);
                            }
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        if let Some(id) = closed {
            self.toasts.retain(|toast| toast.id != id);
        }
    }
}
