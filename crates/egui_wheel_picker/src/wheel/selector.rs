use std::hash::Hash;

use egui::{
    Align2, Context, FontId, Id, Key, Rect, Response, Sense, TextStyle, Ui, Vec2, Widget,
    WidgetInfo, lerp, pos2, vec2,
};

use super::{Debouncer, WheelLength, WheelMotion};

/// Scale of the centered row relative to the body font; rows one step away use [`EDGE_SCALE`].
const CENTER_SCALE: f32 = 1.35;
const EDGE_SCALE: f32 = 0.85;

/// Opacity of rows one step or more away from the center.
const EDGE_OPACITY: f32 = 0.7;

/// Longest frame we integrate over, so a stalled frame doesn't teleport the wheel.
const MAX_DT: f32 = 0.1;

#[derive(Clone, Debug)]
struct WheelState {
    motion: WheelMotion,
    debounce: Debouncer<i32>,

    /// The value and length last seen from (or reported to) the caller.
    /// A difference means the caller changed something and the wheel must follow.
    synced_value: i32,
    synced_length: WheelLength,
}

impl WheelState {
    fn new(value: i32, length: WheelLength) -> Self {
        Self {
            motion: WheelMotion::new(length.len(), length.index_of(value)),
            debounce: Debouncer::default(),
            synced_value: value,
            synced_length: length,
        }
    }
}

/// One vertical wheel of integers, like a single column of an iOS picker.
///
/// Drag, fling or scroll it and the nearest row snaps to the center.
/// Once it has settled (and stayed settled for [`crate::SETTLE_DEBOUNCE`])
/// the centered value is written back and the response is marked as changed.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # use egui_wheel_picker::{WheelLength, WheelSelector};
/// let mut minute = 30;
/// let response = ui.add(
///     WheelSelector::new(&mut minute, WheelLength::Range { start: 0, end: 59 })
///         .formatter(|m| format!("{m:02}"))
///         .width(60.0),
/// );
/// if response.changed() {
///     // `minute` holds the newly settled value.
/// }
/// # });
/// ```
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct WheelSelector<'a> {
    value: &'a mut i32,
    length: WheelLength,
    formatter: Option<Box<dyn Fn(i32) -> String + 'a>>,
    width: f32,
    row_height: f32,
    visible_rows: usize,
    id: Option<Id>,
    id_salt: Option<Id>,
}

impl<'a> WheelSelector<'a> {
    pub fn new(value: &'a mut i32, length: WheelLength) -> Self {
        Self {
            value,
            length,
            formatter: None,
            width: 100.0,
            row_height: 200.0 / 3.0,
            visible_rows: 3,
            id: None,
            id_salt: None,
        }
    }

    /// How to show each value. Defaults to the plain number.
    #[inline]
    pub fn formatter(mut self, formatter: impl Fn(i32) -> String + 'a) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Width of the wheel in points. (Default: 100)
    #[inline]
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Height of one row in points.
    #[inline]
    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height.max(1.0);
        self
    }

    /// How many rows are visible at once. Rounded up to an odd number so one row is centered. (Default: 3)
    #[inline]
    pub fn visible_rows(mut self, visible_rows: usize) -> Self {
        self.visible_rows = visible_rows.max(1) | 1;
        self
    }

    /// Must be set if multiple wheels are in the same [`Ui`].
    #[inline]
    pub fn id_salt(mut self, id_salt: impl Hash) -> Self {
        self.id_salt = Some(Id::new(id_salt));
        self
    }

    /// Use this exact id for the wheel's memory. Needed for [`Self::forget`] and [`Self::flush`].
    #[inline]
    pub fn id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Drop everything the wheel with this `id` remembers, including a value still waiting to be reported.
    ///
    /// Call this when the wheel goes away, so nothing is reported after it is gone.
    pub fn forget(ctx: &Context, id: Id) {
        ctx.data_mut(|data| data.remove::<WheelState>(id));
    }

    /// Take the value the wheel with this `id` has settled on but not reported yet.
    /// A wheel still dragging, coasting or snapping hands out the row it is heading for.
    ///
    /// The wheel stops where it is, and the value is not reported again afterwards.
    pub fn flush(ctx: &Context, id: Id) -> Option<i32> {
        ctx.data_mut(|data| {
            let mut state = data.get_temp::<WheelState>(id)?;
            let length = state.synced_length;
            let value = match state.debounce.cancel() {
                Some(value) => value,
                None if !state.motion.is_idle() => length.value_at(state.motion.resting_index()),
                None => return None,
            };
            let value = length.clamp(value);
            state.motion.jump_to(length.len(), length.index_of(value));
            state.synced_value = value;
            data.insert_temp(id, state);
            Some(value)
        })
    }
}

impl Widget for WheelSelector<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            value,
            length,
            formatter,
            width,
            row_height,
            visible_rows,
            id,
            id_salt,
        } = self;

        let length = length.validate().unwrap_or_else(|err| {
            log::warn!("{err}; showing a fixed wheel instead");
            WheelLength::single(*value)
        });

        let size = vec2(width, row_height * visible_rows as f32);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let id = id.unwrap_or_else(|| ui.make_persistent_id(id_salt));

        let mut state = ui
            .data(|data| data.get_temp::<WheelState>(id))
            .unwrap_or_else(|| WheelState::new(*value, length));

        if state.synced_value != *value || state.synced_length != length {
            // The caller moved us, or the set of values changed under us.
            state
                .motion
                .jump_to(length.len(), length.index_of(*value));
            state.synced_value = *value;
            state.synced_length = length;
        }

        let (now, dt) = ui.input(|i| (i.time, i.stable_dt.min(MAX_DT)));

        if ui.is_enabled() {
            handle_input(ui, &response, rect, row_height, &mut state.motion, dt);
        }

        if let Some(index) = state.motion.step(dt) {
            let settled = length.value_at(index);
            log::trace!("wheel {id:?} settled on {settled}");
            state.debounce.push(settled, now);
        }

        if let Some(settled) = state.debounce.poll(now) {
            let settled = length.clamp(settled);
            log::trace!("wheel {id:?} reports {settled}");
            state.synced_value = settled;
            if *value != settled {
                *value = settled;
                response.mark_changed();
            }
        }

        if state.motion.is_animating() || state.motion.is_dragging() {
            ui.ctx().request_repaint();
        } else if let Some(remaining) = state.debounce.remaining(now) {
            ui.ctx().request_repaint_after(remaining);
        }

        if ui.is_rect_visible(rect) {
            let focused = response.has_focus();
            paint_rows(ui, rect, row_height, length, &state.motion, formatter.as_deref(), focused);
        }

        let centered = length.value_at(state.motion.centered_index());
        let label = formatter
            .as_ref()
            .map_or_else(|| centered.to_string(), |format| format(centered));
        response.widget_info(|| WidgetInfo::slider(ui.is_enabled(), f64::from(centered), &label));

        ui.data_mut(|data| data.insert_temp(id, state));

        response
    }
}

fn handle_input(
    ui: &Ui,
    response: &Response,
    rect: Rect,
    row_height: f32,
    motion: &mut WheelMotion,
    dt: f32,
) {
    if response.dragged() {
        // Pulling the content up brings later rows to the center.
        motion.drag_by(-response.drag_delta().y / row_height, dt);
    }

    if response.drag_stopped() {
        motion.release();
    } else if response.clicked()
        && let Some(pointer) = response.interact_pointer_pos()
    {
        let rows_from_center = ((pointer.y - rect.center().y) / row_height).round();
        let target = motion.centered_index() as f32 + rows_from_center;
        motion.snap_to(target.max(0.0) as usize);
    }

    if response.hovered() && !motion.is_dragging() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            motion.scroll_by(-scroll / row_height);
            ui.input_mut(|i| i.smooth_scroll_delta.y = 0.0);
        }
    }

    if response.has_focus() {
        let (up, down) = ui.input(|i| (i.key_pressed(Key::ArrowUp), i.key_pressed(Key::ArrowDown)));
        let centered = motion.centered_index();
        if up {
            motion.snap_to(centered.saturating_sub(1));
        } else if down {
            motion.snap_to(centered + 1);
        }
    }
}

fn paint_rows(
    ui: &Ui,
    rect: Rect,
    row_height: f32,
    length: WheelLength,
    motion: &WheelMotion,
    formatter: Option<&(dyn Fn(i32) -> String + '_)>,
    focused: bool,
) {
    let painter = ui.painter_at(rect);
    let body_size = TextStyle::Body.resolve(ui.style()).size;
    let visuals = ui.visuals();

    let offset = motion.offset();
    let half_rows = rect.height() / row_height / 2.0;
    let first = (offset - half_rows - 1.0).floor().max(0.0) as usize;
    let last = ((offset + half_rows + 1.0).ceil().max(0.0) as usize).min(motion.rows() - 1);

    for index in first..=last {
        let distance = index as f32 - offset;
        let emphasis = distance.abs().min(1.0);

        let value = length.value_at(index);
        let text = formatter.map_or_else(|| value.to_string(), |format| format(value));
        let size = body_size * lerp(CENTER_SCALE..=EDGE_SCALE, emphasis);
        let color = if emphasis < 0.5 {
            visuals.strong_text_color()
        } else {
            visuals.text_color()
        };
        let opacity = lerp(1.0..=EDGE_OPACITY, emphasis);

        let center = pos2(rect.center().x, rect.center().y + distance * row_height);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color.gamma_multiply(opacity),
        );
    }

    if focused {
        painter.rect_stroke(
            Rect::from_center_size(rect.center(), Vec2::new(rect.width(), row_height)),
            4.0,
            visuals.selection.stroke,
            egui::StrokeKind::Inside,
        );
    }
}

#[cfg(test)]
mod tests {
    use egui::{Context, Event, Modifiers, PointerButton, Pos2, RawInput};

    use super::*;
    use crate::SETTLE_DEBOUNCE;

    const DT: f64 = 1.0 / 60.0;
    const ROW: f32 = 200.0 / 3.0;

    /// Drives a single wheel frame by frame, with full control of the clock and pointer.
    struct Rig {
        ctx: Context,
        time: f64,
        value: i32,
        length: WheelLength,
        changes: Vec<i32>,
        rect: Rect,
    }

    impl Rig {
        fn new(value: i32, length: WheelLength) -> Self {
            let mut rig = Self {
                ctx: Context::default(),
                time: 0.0,
                value,
                length,
                changes: vec![],
                rect: Rect::NOTHING,
            };
            rig.frame(vec![]);
            rig
        }

        fn id() -> Id {
            Id::new("test_wheel")
        }

        fn frame(&mut self, events: Vec<Event>) {
            self.time += DT;
            let input = RawInput {
                time: Some(self.time),
                predicted_dt: DT as f32,
                events,
                ..Default::default()
            };
            let Self {
                ctx,
                value,
                length,
                changes,
                rect,
                ..
            } = self;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let response = ui.add(WheelSelector::new(&mut *value, *length).id(Self::id()));
                    *rect = response.rect;
                    if response.changed() {
                        changes.push(*value);
                    }
                });
            });
        }

        fn wait(&mut self, seconds: f64) {
            let until = self.time + seconds;
            while self.time < until {
                self.frame(vec![]);
            }
        }

        fn pointer(pos: Pos2, pressed: bool) -> Event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::default(),
            }
        }

        /// Slowly drag the wheel by `rows`, hold still, and let go.
        fn drag_and_release(&mut self, rows: f32) {
            let start = self.rect.center();
            let steps = 20;
            let step = -rows * ROW / steps as f32;

            self.frame(vec![Event::PointerMoved(start)]);
            self.frame(vec![Self::pointer(start, true)]);
            let mut pos = start;
            for _ in 0..steps {
                pos.y += step;
                self.frame(vec![Event::PointerMoved(pos)]);
            }
            for _ in 0..10 {
                self.frame(vec![]);
            }
            self.frame(vec![Self::pointer(pos, false)]);
        }

        /// [`Self::drag_and_release`], then run frames until the wheel has settled
        /// (but not yet reported).
        fn drag_and_settle(&mut self, rows: f32) {
            self.drag_and_release(rows);
            for _ in 0..120 {
                if self.pending() {
                    return;
                }
                self.frame(vec![]);
            }
            panic!("the wheel never settled");
        }

        fn state(&self) -> Option<WheelState> {
            self.ctx.data(|data| data.get_temp::<WheelState>(Self::id()))
        }

        fn pending(&self) -> bool {
            self.state().is_some_and(|state| state.debounce.is_pending())
        }

        fn centered(&self) -> i32 {
            let state = self.state().unwrap();
            self.length.value_at(state.motion.centered_index())
        }
    }

    #[test]
    fn first_show_centers_the_value_without_reporting_it() {
        let mut rig = Rig::new(7, WheelLength::Count(31));
        rig.wait(1.0);
        assert_eq!(rig.centered(), 7);
        assert!(rig.changes.is_empty());
    }

    #[test]
    fn out_of_range_value_is_shown_clamped() {
        let mut rig = Rig::new(1990, WheelLength::Range { start: 2000, end: 2025 });
        rig.wait(0.5);
        assert_eq!(rig.centered(), 2000);
        assert_eq!(rig.value, 1990, "showing a value doesn't change it");
    }

    #[test]
    fn external_changes_move_the_wheel() {
        let mut rig = Rig::new(31, WheelLength::Count(31));
        rig.value = 12;
        rig.frame(vec![]);
        assert_eq!(rig.centered(), 12);

        rig.value = 30;
        rig.length = WheelLength::Count(28);
        rig.frame(vec![]);
        assert_eq!(rig.centered(), 28, "a shorter month clamps the wheel");
        assert!(rig.changes.is_empty());
    }

    #[test]
    fn one_settle_reports_once_after_the_debounce() {
        let mut rig = Rig::new(1, WheelLength::Count(12));
        rig.drag_and_settle(3.0);
        assert!(rig.changes.is_empty(), "still inside the debounce window");

        rig.wait(SETTLE_DEBOUNCE.as_secs_f64() + 0.1);
        assert_eq!(rig.changes, vec![4]);
        assert_eq!(rig.value, 4);

        rig.wait(1.0);
        assert_eq!(rig.changes, vec![4], "no further reports");
    }

    #[test]
    fn settling_back_on_the_same_value_is_not_a_change() {
        let mut rig = Rig::new(5, WheelLength::Count(12));
        rig.drag_and_settle(0.3);
        rig.wait(1.0);
        assert!(rig.changes.is_empty());
        assert_eq!(rig.value, 5);
    }

    #[test]
    fn flush_hands_out_the_pending_value() {
        let mut rig = Rig::new(1, WheelLength::Count(12));
        rig.drag_and_settle(2.0);
        assert_eq!(WheelSelector::flush(&rig.ctx, Rig::id()), Some(3));
        assert_eq!(WheelSelector::flush(&rig.ctx, Rig::id()), None);
        rig.wait(1.0);
        assert!(rig.changes.is_empty(), "flushed values are not reported again");
    }

    #[test]
    fn flush_while_snapping_hands_out_the_target() {
        let mut rig = Rig::new(1, WheelLength::Count(12));
        // Let go between rows, so the snap takes a few frames:
        rig.drag_and_release(2.3);
        assert!(!rig.pending(), "still snapping");
        assert_eq!(WheelSelector::flush(&rig.ctx, Rig::id()), Some(3));
        assert!(rig.state().is_some_and(|state| state.motion.is_idle()));

        rig.wait(1.0);
        assert!(rig.changes.is_empty(), "flushed values are not reported again");
    }

    #[test]
    fn flush_of_an_idle_wheel_is_nothing() {
        let mut rig = Rig::new(4, WheelLength::Count(12));
        rig.wait(0.5);
        assert_eq!(WheelSelector::flush(&rig.ctx, Rig::id()), None);
    }

    #[test]
    fn forget_cancels_the_pending_value() {
        let mut rig = Rig::new(1, WheelLength::Count(12));
        rig.drag_and_settle(2.0);
        WheelSelector::forget(&rig.ctx, Rig::id());
        assert!(rig.state().is_none());
        assert!(!rig.pending());
    }
}
