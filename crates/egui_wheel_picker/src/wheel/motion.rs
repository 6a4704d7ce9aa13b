/// Fling velocity (rows per second) below which a wheel starts snapping.
const MIN_FLING_VELOCITY: f32 = 0.75;

/// Flings are capped so one flick can not spin through the whole year wheel.
const MAX_FLING_VELOCITY: f32 = 30.0;

/// Exponential velocity decay per second while coasting.
const FRICTION: f32 = 4.0;

/// How fast a snap closes the gap to its target.
const SNAP_STIFFNESS: f32 = 18.0;

/// Closer than this (in rows) and the snap is done.
const SNAP_EPSILON: f32 = 0.002;

/// How far past either end a drag may pull the wheel, in rows.
const OVERSCROLL: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// At rest on a row.
    Idle,

    /// Following the pointer.
    Dragging { velocity: f32 },

    /// Released with speed, slowing down.
    Coasting { velocity: f32 },

    /// Easing towards a row. Reaching it is a settle.
    Snapping { target: usize },
}

/// The scroll position of a wheel, without any UI attached.
///
/// The offset is measured in rows: an offset of `2.0` means row 2 sits exactly in the center.
/// Gestures ([`Self::drag_by`], [`Self::scroll_by`], [`Self::snap_to`]) move it,
/// and [`Self::step`] advances the animation and reports when the wheel settles.
///
/// Every gesture ends in exactly one settle, unless another gesture interrupts it first.
/// Programmatic moves ([`Self::jump_to`]) never settle.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelMotion {
    offset: f32,
    rows: usize,
    phase: Phase,
}

impl WheelMotion {
    /// A wheel of `rows` rows resting on row `index`.
    pub fn new(rows: usize, index: usize) -> Self {
        let mut motion = Self {
            offset: 0.0,
            rows: 1,
            phase: Phase::Idle,
        };
        motion.jump_to(rows, index);
        motion
    }

    /// Current position, in rows.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The row closest to the center.
    pub fn centered_index(&self) -> usize {
        self.nearest_row(self.offset)
    }

    /// The row the wheel is heading for: the snap target, or the centered row otherwise.
    pub fn resting_index(&self) -> usize {
        match self.phase {
            Phase::Snapping { target } => target,
            Phase::Idle | Phase::Dragging { .. } | Phase::Coasting { .. } => self.centered_index(),
        }
    }

    /// Is the wheel moving on its own (coasting or snapping)?
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Coasting { .. } | Phase::Snapping { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Move straight to `index` without animating or settling.
    ///
    /// Also used when the number of rows changes.
    pub fn jump_to(&mut self, rows: usize, index: usize) {
        self.rows = rows.max(1);
        self.offset = index.min(self.last_row()) as f32;
        self.phase = Phase::Idle;
    }

    /// Follow the pointer by `rows` over the last `dt` seconds.
    pub fn drag_by(&mut self, rows: f32, dt: f32) {
        let previous = match self.phase {
            Phase::Dragging { velocity } => velocity,
            Phase::Idle | Phase::Coasting { .. } | Phase::Snapping { .. } => 0.0,
        };
        let max = self.last_row() as f32;
        self.offset = (self.offset + rows).clamp(-OVERSCROLL, max + OVERSCROLL);

        let velocity = if dt > 0.0 {
            // Smooth it out, pointer deltas are noisy:
            0.5 * previous + 0.5 * (rows / dt)
        } else {
            previous
        };
        self.phase = Phase::Dragging { velocity };
    }

    /// The pointer let go. Coast if it was moving fast, otherwise snap.
    pub fn release(&mut self) {
        let Phase::Dragging { velocity } = self.phase else {
            return;
        };
        if velocity.abs() >= MIN_FLING_VELOCITY {
            self.phase = Phase::Coasting {
                velocity: velocity.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY),
            };
        } else {
            self.snap_to(self.centered_index());
        }
    }

    /// Scroll wheel or touchpad: move by `rows` and snap to wherever that lands.
    pub fn scroll_by(&mut self, rows: f32) {
        let max = self.last_row() as f32;
        self.offset = (self.offset + rows).clamp(0.0, max);
        self.snap_to(self.centered_index());
    }

    /// Animate to row `index`.
    pub fn snap_to(&mut self, index: usize) {
        self.phase = Phase::Snapping {
            target: index.min(self.last_row()),
        };
    }

    /// Advance the animation by `dt` seconds.
    ///
    /// Returns the row the wheel settled on, on the one step where a snap completes.
    pub fn step(&mut self, dt: f32) -> Option<usize> {
        match self.phase {
            Phase::Idle | Phase::Dragging { .. } => None,

            Phase::Coasting { velocity } => {
                let max = self.last_row() as f32;
                self.offset += velocity * dt;
                let velocity = velocity * (-FRICTION * dt).exp();
                let hit_end = self.offset <= 0.0 || max <= self.offset;
                self.offset = self.offset.clamp(0.0, max);
                if hit_end || velocity.abs() < MIN_FLING_VELOCITY {
                    self.snap_to(self.centered_index());
                } else {
                    self.phase = Phase::Coasting { velocity };
                }
                None
            }

            Phase::Snapping { target } => {
                let target_offset = target as f32;
                let t = 1.0 - (-SNAP_STIFFNESS * dt).exp();
                self.offset += (target_offset - self.offset) * t;
                if (target_offset - self.offset).abs() < SNAP_EPSILON {
                    self.offset = target_offset;
                    self.phase = Phase::Idle;
                    Some(target)
                } else {
                    None
                }
            }
        }
    }

    fn last_row(&self) -> usize {
        self.rows - 1
    }

    fn nearest_row(&self, offset: f32) -> usize {
        let max = self.last_row() as f32;
        offset.round().clamp(0.0, max) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_until_settled(motion: &mut WheelMotion) -> Vec<usize> {
        let mut settles = vec![];
        for _ in 0..600 {
            settles.extend(motion.step(DT));
        }
        settles
    }

    #[test]
    fn jump_does_not_settle() {
        let mut motion = WheelMotion::new(31, 0);
        motion.jump_to(31, 14);
        assert_eq!(motion.centered_index(), 14);
        assert!(motion.is_idle());
        assert!(run_until_settled(&mut motion).is_empty());
    }

    #[test]
    fn jump_clamps_to_the_last_row() {
        let mut motion = WheelMotion::new(31, 30);
        motion.jump_to(28, 30);
        assert_eq!(motion.centered_index(), 27);
        assert_eq!(motion.rows(), 28);
    }

    #[test]
    fn slow_drag_snaps_to_the_nearest_row_and_settles_once() {
        let mut motion = WheelMotion::new(12, 2);
        motion.drag_by(0.3, 1.0);
        motion.drag_by(0.4, 1.0);
        assert!(motion.is_dragging());
        motion.release();
        assert_eq!(run_until_settled(&mut motion), vec![3]);
        assert_eq!(motion.offset(), 3.0);
        assert!(motion.is_idle());
    }

    #[test]
    fn fling_coasts_further_than_the_drag() {
        let mut motion = WheelMotion::new(100, 10);
        for _ in 0..5 {
            motion.drag_by(0.25, DT);
        }
        motion.release();
        assert!(motion.is_animating());
        let settles = run_until_settled(&mut motion);
        assert_eq!(settles.len(), 1);
        assert!(settles[0] > 12, "fling should carry on, settled on {settles:?}");
    }

    #[test]
    fn fling_stops_at_the_end() {
        let mut motion = WheelMotion::new(6, 4);
        for _ in 0..5 {
            motion.drag_by(0.5, DT);
        }
        motion.release();
        assert_eq!(run_until_settled(&mut motion), vec![5]);
    }

    #[test]
    fn scroll_snaps_to_where_it_lands() {
        let mut motion = WheelMotion::new(12, 0);
        motion.scroll_by(2.4);
        assert_eq!(run_until_settled(&mut motion), vec![2]);

        motion.scroll_by(-10.0);
        assert_eq!(run_until_settled(&mut motion), vec![0]);
    }

    #[test]
    fn interrupted_snap_does_not_settle_twice() {
        let mut motion = WheelMotion::new(12, 0);
        motion.snap_to(5);
        motion.step(DT);
        motion.drag_by(0.1, DT);
        assert_eq!(motion.step(DT), None);
        motion.release();
        assert_eq!(run_until_settled(&mut motion).len(), 1);
    }

    #[test]
    fn resting_index_is_the_snap_target() {
        let mut motion = WheelMotion::new(12, 0);
        motion.snap_to(5);
        motion.step(DT);
        assert!(motion.centered_index() < 5, "still on the way");
        assert_eq!(motion.resting_index(), 5);

        run_until_settled(&mut motion);
        assert_eq!(motion.resting_index(), 5);
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let mut motion = WheelMotion::new(12, 3);
        motion.release();
        assert!(motion.is_idle());
        assert!(run_until_settled(&mut motion).is_empty());
    }

    #[test]
    fn single_row_wheel_stays_put() {
        let mut motion = WheelMotion::new(1, 0);
        motion.drag_by(3.0, DT);
        motion.release();
        let settles = run_until_settled(&mut motion);
        assert!(settles.iter().all(|&index| index == 0), "{settles:?}");
        assert_eq!(motion.centered_index(), 0);
    }
}
