//! Exponential smoothers for the two continuous scene signals.
//!
//! Both signals move a fraction `f` of the remaining distance per step.  In
//! [`Smoothing::PerFrame`] that step is one call, so the effective speed
//! depends on the frame rate.  [`Smoothing::TimeScaled`] converts `f` into
//! `1 - (1 - f)^(dt · reference_hz)`, which gives the same curve as
//! `PerFrame` at `reference_hz` and stays frame-rate independent elsewhere.

use crate::machine::nearest_index;
use crate::mode::InteractionMode;

pub const PROGRESS_FACTOR:     f32 = 0.05;
pub const SCROLL_FOLLOW_FACTOR: f32 = 0.1;
pub const SCROLL_SNAP_FACTOR:   f32 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Smoothing {
    #[default]
    PerFrame,
    TimeScaled { reference_hz: f32 },
}

impl Smoothing {
    /// Effective blend factor for one step of `dt` seconds.
    pub fn factor(&self, base: f32, dt: f32) -> f32 {
        let f = match *self {
            Smoothing::PerFrame => base,
            Smoothing::TimeScaled { reference_hz } => {
                let frames = (dt * reference_hz).max(0.0);
                1.0 - (1.0 - base).powf(frames)
            }
        };
        f.clamp(0.0, 1.0)
    }

    pub fn step(&self, current: f32, target: f32, base: f32, dt: f32) -> f32 {
        current + (target - current) * self.factor(base, dt)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ProgressAnimator
// ════════════════════════════════════════════════════════════════════════════

/// Tree-formation blend: 1.0 gathered, 0.0 scattered.
#[derive(Clone, Copy, Debug)]
pub struct ProgressAnimator {
    value:     f32,
    smoothing: Smoothing,
}

impl ProgressAnimator {
    /// Starts fully formed, as the scene opens on the tree.
    pub fn new(smoothing: Smoothing) -> Self {
        ProgressAnimator { value: 1.0, smoothing }
    }

    pub fn tick(&mut self, mode: InteractionMode, dt: f32) -> f32 {
        self.value = self.smoothing.step(self.value, mode.progress_target(), PROGRESS_FACTOR, dt);
        self.value
    }

    pub fn value(&self) -> f32 { self.value }
}

// ════════════════════════════════════════════════════════════════════════════
// ScrollMapper
// ════════════════════════════════════════════════════════════════════════════

/// Fractional carousel position in `[0, photo_count - 1]`.
#[derive(Clone, Copy, Debug)]
pub struct ScrollMapper {
    offset:    f32,
    smoothing: Smoothing,
}

impl ScrollMapper {
    pub fn new(smoothing: Smoothing) -> Self {
        ScrollMapper { offset: 0.0, smoothing }
    }

    /// Linear map of a mirrored hand x in `[0, 1]` onto the photo range.
    pub fn target_for(hand_x: f32, photo_count: usize) -> f32 {
        hand_x * photo_count.saturating_sub(1) as f32
    }

    /// Chase the hand.
    pub fn follow(&mut self, hand_x: f32, photo_count: usize, dt: f32) -> f32 {
        let target = Self::target_for(hand_x, photo_count);
        self.offset = self.smoothing.step(self.offset, target, SCROLL_FOLLOW_FACTOR, dt);
        self.offset
    }

    /// Settle on the nearest whole photo.
    pub fn snap(&mut self, dt: f32) -> f32 {
        let target = nearest_index(self.offset) as f32;
        self.offset = self.smoothing.step(self.offset, target, SCROLL_SNAP_FACTOR, dt);
        self.offset
    }

    pub fn jump_to(&mut self, offset: f32) { self.offset = offset; }

    pub fn offset(&self) -> f32 { self.offset }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn progress_converges_in_tree() {
        let mut p = ProgressAnimator::new(Smoothing::PerFrame);
        for _ in 0..200 { p.tick(InteractionMode::Unleashed, DT); }
        assert!(p.value() < 1e-3);
        for _ in 0..300 { p.tick(InteractionMode::Tree, DT); }
        assert!((p.value() - 1.0).abs() < 1e-3, "progress {}", p.value());
    }

    #[test]
    fn per_frame_ignores_dt() {
        let s = Smoothing::PerFrame;
        assert_eq!(s.factor(0.05, 0.0), 0.05);
        assert_eq!(s.factor(0.05, 1.0), 0.05);
    }

    #[test]
    fn time_scaled_matches_per_frame_at_reference_rate() {
        let s = Smoothing::TimeScaled { reference_hz: 60.0 };
        assert!((s.factor(0.1, 1.0 / 60.0) - 0.1).abs() < 1e-5);
        // Two half-length steps cover the same ground as one full step.
        let one = s.step(0.0, 1.0, 0.1, 1.0 / 60.0);
        let half = s.step(s.step(0.0, 1.0, 0.1, 1.0 / 120.0), 1.0, 0.1, 1.0 / 120.0);
        assert!((one - half).abs() < 1e-5);
    }

    #[test]
    fn snap_settles_on_nearest_integer() {
        let mut m = ScrollMapper::new(Smoothing::PerFrame);
        m.jump_to(2.4);
        for _ in 0..400 { m.snap(DT); }
        assert!((m.offset() - 2.0).abs() < 1e-3);
        m.jump_to(2.6);
        for _ in 0..400 { m.snap(DT); }
        assert!((m.offset() - 3.0).abs() < 1e-3);
    }

    #[test]
    fn target_spans_photo_range() {
        assert_eq!(ScrollMapper::target_for(0.0, 5), 0.0);
        assert_eq!(ScrollMapper::target_for(1.0, 5), 4.0);
        assert_eq!(ScrollMapper::target_for(1.0, 0), 0.0);
    }

    proptest! {
        #[test]
        fn follow_is_monotone_without_overshoot(
            start  in 0.0f32..30.0,
            hand_x in 0.0f32..1.0,
            count  in 1usize..31,
        ) {
            let mut m = ScrollMapper::new(Smoothing::PerFrame);
            m.jump_to(start);
            let target = ScrollMapper::target_for(hand_x, count);
            let mut prev = start;
            for _ in 0..200 {
                let next = m.follow(hand_x, count, DT);
                prop_assert!((target - next).abs() <= (target - prev).abs());
                prop_assert!((target - next) * (target - prev) >= 0.0);
                prev = next;
            }
        }
    }
}
