//! The five-state interaction machine.
//!
//! | Current | Confirmed pose | Next |
//! |---|---|---|
//! | `FOCUS`     | `OPEN`   | `CAROUSEL` |
//! | `CAROUSEL`  | `PINCH`  | `FOCUS`, selecting `round(scroll)` if in range |
//! | `TREE`      | `OPEN`   | `UNLEASHED` |
//! | not `TREE`  | `CLOSED` | `TREE` |
//! | `UNLEASHED` | `OPEN`   | `CAROUSEL`, only with at least one photo |
//!
//! Rows are tried top to bottom and the first row whose mode and pose match
//! decides the outcome, even when its guard then rejects the move.

use std::time::{Duration, Instant};

use hand_pose::PoseLabel;

use crate::error::TransitionError;
use crate::lock::TransitionLock;
use crate::mode::InteractionMode;

/// Inputs the transition guards depend on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionContext {
    pub photo_count:   usize,
    pub scroll_offset: f32,
}

/// A move the table asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeRequest {
    pub to:        InteractionMode,
    /// Photo picked on `CAROUSEL → FOCUS`.
    pub selection: Option<usize>,
}

impl ModeRequest {
    fn to(mode: InteractionMode) -> Self {
        ModeRequest { to: mode, selection: None }
    }
}

/// Rounds halves upward, matching the carousel's notion of "nearest photo".
pub fn nearest_index(offset: f32) -> i64 {
    (offset + 0.5).floor() as i64
}

#[derive(Clone, Copy, Debug)]
pub struct ModeStateMachine {
    mode: InteractionMode,
    lock: TransitionLock,
}

impl Default for ModeStateMachine {
    fn default() -> Self { ModeStateMachine::with_mode(InteractionMode::Tree, crate::lock::DEFAULT_COOLDOWN) }
}

impl ModeStateMachine {
    pub fn new(cooldown: Duration) -> Self {
        ModeStateMachine::with_mode(InteractionMode::Tree, cooldown)
    }

    pub fn with_mode(mode: InteractionMode, cooldown: Duration) -> Self {
        ModeStateMachine { mode, lock: TransitionLock::new(cooldown) }
    }

    pub fn mode(&self) -> InteractionMode { self.mode }
    pub fn lock(&self) -> &TransitionLock { &self.lock }

    /// Look up the transition table for the current mode.  Pure: neither the
    /// lock nor the mode is touched.
    pub fn evaluate(&self, pose: PoseLabel, ctx: TransitionContext) -> Option<ModeRequest> {
        use InteractionMode::*;

        match (self.mode, pose) {
            (Focus, PoseLabel::Open) => Some(ModeRequest::to(Carousel)),
            (Carousel, PoseLabel::Pinch) => {
                let idx = nearest_index(ctx.scroll_offset);
                if idx >= 0 && (idx as usize) < ctx.photo_count {
                    Some(ModeRequest { to: Focus, selection: Some(idx as usize) })
                } else {
                    None
                }
            }
            (Tree, PoseLabel::Open) => Some(ModeRequest::to(Unleashed)),
            (m, PoseLabel::Closed) if m != Tree => Some(ModeRequest::to(Tree)),
            (Unleashed, PoseLabel::Open) if ctx.photo_count > 0 => Some(ModeRequest::to(Carousel)),
            _ => None,
        }
    }

    /// Move to `to`, stamping the lock.  With `respect_cooldown` the move is
    /// refused while the lock is engaged.  Returns the previous mode.
    pub fn transition(
        &mut self,
        to:               InteractionMode,
        now:              Instant,
        respect_cooldown: bool,
    ) -> Result<InteractionMode, TransitionError> {
        if to == self.mode {
            return Err(TransitionError::SameMode(to));
        }
        if respect_cooldown && self.lock.is_locked(now) {
            return Err(TransitionError::CoolingDown { remaining: self.lock.remaining(now) });
        }
        let from = self.mode;
        self.mode = to;
        self.lock.stamp(now);
        Ok(from)
    }

    /// Re-engage the lock without changing mode, for changes of what a mode
    /// shows (photo swapped for the letter inside FOCUS).
    pub fn restamp(&mut self, now: Instant) {
        self.lock.stamp(now);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use InteractionMode::*;

    const COOLDOWN: Duration = Duration::from_millis(1000);

    fn machine(mode: InteractionMode) -> ModeStateMachine {
        ModeStateMachine::with_mode(mode, COOLDOWN)
    }

    fn ctx(photo_count: usize, scroll_offset: f32) -> TransitionContext {
        TransitionContext { photo_count, scroll_offset }
    }

    #[test]
    fn tree_open_unleashes() {
        let r = machine(Tree).evaluate(PoseLabel::Open, ctx(0, 0.0));
        assert_eq!(r, Some(ModeRequest { to: Unleashed, selection: None }));
    }

    #[test]
    fn tree_ignores_closed() {
        assert_eq!(machine(Tree).evaluate(PoseLabel::Closed, ctx(3, 0.0)), None);
    }

    #[test]
    fn unleashed_open_needs_photos() {
        assert_eq!(machine(Unleashed).evaluate(PoseLabel::Open, ctx(0, 0.0)), None);
        assert_eq!(
            machine(Unleashed).evaluate(PoseLabel::Open, ctx(1, 0.0)).map(|r| r.to),
            Some(Carousel),
        );
    }

    #[test]
    fn carousel_pinch_selects_nearest() {
        let r = machine(Carousel).evaluate(PoseLabel::Pinch, ctx(5, 2.4));
        assert_eq!(r, Some(ModeRequest { to: Focus, selection: Some(2) }));
        let r = machine(Carousel).evaluate(PoseLabel::Pinch, ctx(5, 2.5));
        assert_eq!(r.and_then(|r| r.selection), Some(3));
    }

    #[test]
    fn carousel_pinch_out_of_range_does_nothing() {
        assert_eq!(machine(Carousel).evaluate(PoseLabel::Pinch, ctx(3, 2.6)), None);
        assert_eq!(machine(Carousel).evaluate(PoseLabel::Pinch, ctx(0, 0.0)), None);
    }

    #[test]
    fn focus_open_returns_to_carousel() {
        assert_eq!(machine(Focus).evaluate(PoseLabel::Open, ctx(2, 1.0)).map(|r| r.to), Some(Carousel));
    }

    #[test]
    fn closed_goes_home_from_anywhere_else() {
        for m in [Unleashed, Carousel, Focus] {
            assert_eq!(machine(m).evaluate(PoseLabel::Closed, ctx(2, 0.0)).map(|r| r.to), Some(Tree));
        }
    }

    #[test]
    fn carousel_open_is_not_a_transition() {
        assert_eq!(machine(Carousel).evaluate(PoseLabel::Open, ctx(4, 1.0)), None);
    }

    #[test]
    fn transition_stamps_and_respects_cooldown() {
        let t0 = Instant::now();
        let mut m = machine(Tree);
        assert_eq!(m.transition(Unleashed, t0, true), Ok(Tree));
        assert_eq!(m.lock().last_change(), Some(t0));

        let early = t0 + Duration::from_millis(300);
        assert!(matches!(m.transition(Carousel, early, true), Err(TransitionError::CoolingDown { .. })));
        assert_eq!(m.mode(), Unleashed);

        assert_eq!(m.transition(Tree, early, false), Ok(Unleashed));
        assert_eq!(m.lock().last_change(), Some(early));
    }

    #[test]
    fn same_mode_is_rejected() {
        let mut m = machine(Focus);
        assert_eq!(m.transition(Focus, Instant::now(), false), Err(TransitionError::SameMode(Focus)));
    }

    #[test]
    fn nearest_index_rounds_half_up() {
        assert_eq!(nearest_index(2.4), 2);
        assert_eq!(nearest_index(2.5), 3);
        assert_eq!(nearest_index(-0.5), 0);
        assert_eq!(nearest_index(-0.6), -1);
    }

    #[test]
    fn restamp_keeps_mode_and_engages_lock() {
        let mut m = machine(Focus);
        let t0 = Instant::now();
        m.restamp(t0);
        assert_eq!(m.mode(), Focus);
        assert_eq!(m.lock().last_change(), Some(t0));
        assert!(m.lock().is_locked(t0 + Duration::from_millis(500)));
    }
}
