//! The shared interaction state for one running scene.
//!
//! `InteractionSession` owns everything the gesture path writes and the
//! render path reads: mode, progress, scroll offset, selection and letter
//! focus.  Both loops receive it by reference; neither calls into the other.
//!
//! Every writer of the mode, whether a confirmed gesture or a pointer click,
//! goes through [`InteractionSession::request_transition`].  That one
//! function stamps the transition lock and resets the debouncer, so a click
//! and a gesture landing in the same frame are resolved by call order: the
//! first applied change engages the lock and the gesture behind it is
//! refused.  Pointer requests skip the cooldown check itself.

use std::time::{Duration, Instant};

use hand_pose::{
    DebounceConfig, GestureClassifier, HandFrame, PoseDebouncer, PoseLabel, PoseThresholds,
};

use crate::error::TransitionError;
use crate::lock::DEFAULT_COOLDOWN;
use crate::machine::{ModeStateMachine, TransitionContext};
use crate::mode::InteractionMode;
use crate::smoothing::{ProgressAnimator, ScrollMapper, Smoothing};

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub thresholds: PoseThresholds,
    pub debounce:   DebounceConfig,
    pub cooldown:   Duration,
    pub smoothing:  Smoothing,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            thresholds: PoseThresholds::default(),
            debounce:   DebounceConfig::default(),
            cooldown:   DEFAULT_COOLDOWN,
            smoothing:  Smoothing::PerFrame,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Events & reports
// ════════════════════════════════════════════════════════════════════════════

/// Who asked for a mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOrigin {
    /// A confirmed, debounced hand pose; subject to the cooldown.
    Gesture,
    /// A direct click on the tree or the letter.
    Pointer,
}

/// Things observers may want to react to, drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    ModeChanged { from: InteractionMode, to: InteractionMode, origin: TransitionOrigin },
    /// Emitted exactly once per `CAROUSEL → FOCUS` transition.
    Selected(usize),
    PoseDisplayed(PoseLabel),
    LetterFocus(bool),
}

/// Result of feeding one inference frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureReport {
    pub pose:       PoseLabel,
    pub count:      u32,
    pub confirmed:  bool,
    pub transition: Option<InteractionMode>,
}

// ════════════════════════════════════════════════════════════════════════════
// InteractionSession
// ════════════════════════════════════════════════════════════════════════════

pub struct InteractionSession {
    classifier:     GestureClassifier,
    debouncer:      PoseDebouncer,
    machine:        ModeStateMachine,
    progress:       ProgressAnimator,
    scroll:         ScrollMapper,
    photo_count:    usize,
    selection:      Option<usize>,
    letter_focused: bool,
    hand_position:  Option<(f32, f32)>,
    events:         Vec<SessionEvent>,
}

impl Default for InteractionSession {
    fn default() -> Self { InteractionSession::new(SessionConfig::default()) }
}

impl InteractionSession {
    pub fn new(cfg: SessionConfig) -> Self {
        InteractionSession {
            classifier:     GestureClassifier::new(cfg.thresholds),
            debouncer:      PoseDebouncer::new(cfg.debounce),
            machine:        ModeStateMachine::new(cfg.cooldown),
            progress:       ProgressAnimator::new(cfg.smoothing),
            scroll:         ScrollMapper::new(cfg.smoothing),
            photo_count:    0,
            selection:      None,
            letter_focused: false,
            hand_position:  None,
            events:         Vec::new(),
        }
    }

    // ── the single mode writer ────────────────────────────────────────────

    pub fn request_transition(
        &mut self,
        to:     InteractionMode,
        origin: TransitionOrigin,
        now:    Instant,
    ) -> Result<(), TransitionError> {
        let respect_cooldown = origin == TransitionOrigin::Gesture;
        let from = self.machine.transition(to, now, respect_cooldown)?;

        self.debouncer.reset();
        if from == InteractionMode::Focus && self.letter_focused {
            self.letter_focused = false;
            self.events.push(SessionEvent::LetterFocus(false));
        }
        self.events.push(SessionEvent::ModeChanged { from, to, origin });
        log::info!("mode {} → {} ({:?})", from, to, origin);
        Ok(())
    }

    // ── gesture loop ──────────────────────────────────────────────────────

    /// Feed one inference result.  `None` means no hand was detected (or
    /// detection failed this frame).
    pub fn on_gesture_frame(&mut self, frame: Option<&HandFrame>, now: Instant, dt: f32) -> GestureReport {
        let Some(frame) = frame else {
            return self.hand_lost(dt);
        };

        let (hand_x, hand_y) = frame.mirrored_wrist();
        self.hand_position = Some((hand_x, hand_y));

        let out = self.debouncer.observe(self.classifier.classify(frame));
        if out.display_changed {
            self.events.push(SessionEvent::PoseDisplayed(out.label));
        }

        let mut transition = None;
        if out.confirmed && !self.machine.lock().is_locked(now) {
            let ctx = TransitionContext {
                photo_count:   self.photo_count,
                scroll_offset: self.scroll.offset(),
            };
            if let Some(req) = self.machine.evaluate(out.label, ctx) {
                match self.request_transition(req.to, TransitionOrigin::Gesture, now) {
                    Ok(()) => {
                        transition = Some(req.to);
                        if let Some(idx) = req.selection {
                            self.select(idx);
                        }
                    }
                    Err(e) => log::debug!("gesture {} ignored: {}", out.label, e),
                }
            }
        }

        // While the lock is engaged the carousel holds still: no follow, no snap.
        if self.mode() == InteractionMode::Carousel && !self.machine.lock().is_locked(now) {
            if self.debouncer.current() == PoseLabel::Open {
                self.scroll.follow(hand_x, self.photo_count, dt);
            } else {
                self.scroll.snap(dt);
            }
        }

        GestureReport {
            pose:      out.label,
            count:     out.count,
            confirmed: out.confirmed,
            transition,
        }
    }

    fn hand_lost(&mut self, dt: f32) -> GestureReport {
        let was_displayed = self.debouncer.displayed();
        self.debouncer.clear();
        self.hand_position = None;
        if was_displayed != PoseLabel::None {
            self.events.push(SessionEvent::PoseDisplayed(PoseLabel::None));
        }
        if self.mode() == InteractionMode::Carousel {
            self.scroll.snap(dt);
        }
        GestureReport { pose: PoseLabel::None, count: 0, confirmed: false, transition: None }
    }

    fn select(&mut self, idx: usize) {
        self.selection = Some(idx);
        if self.letter_focused {
            self.letter_focused = false;
            self.events.push(SessionEvent::LetterFocus(false));
        }
        self.events.push(SessionEvent::Selected(idx));
    }

    // ── render loop ───────────────────────────────────────────────────────

    pub fn render_tick(&mut self, dt: f32) -> f32 {
        self.progress.tick(self.machine.mode(), dt)
    }

    // ── pointer entry points ──────────────────────────────────────────────

    /// Click on the tree: closes an open letter, otherwise toggles
    /// `TREE ⇄ UNLEASHED` (any other mode goes back to `TREE`).
    pub fn click_tree(&mut self, now: Instant) -> Result<(), TransitionError> {
        if self.letter_focused {
            return self.toggle_letter(now);
        }
        let to = if self.mode() == InteractionMode::Tree {
            InteractionMode::Unleashed
        } else {
            InteractionMode::Tree
        };
        self.request_transition(to, TransitionOrigin::Pointer, now)
    }

    /// Click on the letter prop: opens it in `FOCUS`, or closes it and
    /// returns to `TREE`.
    pub fn toggle_letter(&mut self, now: Instant) -> Result<(), TransitionError> {
        if self.letter_focused {
            self.letter_focused = false;
            self.events.push(SessionEvent::LetterFocus(false));
            if self.mode() == InteractionMode::Focus {
                return self.request_transition(InteractionMode::Tree, TransitionOrigin::Pointer, now);
            }
            Ok(())
        } else {
            self.letter_focused = true;
            self.selection = None;
            self.events.push(SessionEvent::LetterFocus(true));
            if self.mode() != InteractionMode::Focus {
                return self.request_transition(InteractionMode::Focus, TransitionOrigin::Pointer, now);
            }
            // Photo swapped for the letter inside FOCUS: no mode change, but
            // it still counts as one for the lock and the debouncer.
            self.machine.restamp(now);
            self.debouncer.reset();
            log::info!("{}: photo → letter (Pointer)", InteractionMode::Focus);
            Ok(())
        }
    }

    // ── photo context ─────────────────────────────────────────────────────

    pub fn set_photo_count(&mut self, count: usize) {
        self.photo_count = count;
        if matches!(self.selection, Some(i) if i >= count) {
            self.selection = None;
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn mode(&self)             -> InteractionMode    { self.machine.mode() }
    pub fn progress(&self)         -> f32                { self.progress.value() }
    pub fn scroll_offset(&self)    -> f32                { self.scroll.offset() }
    pub fn selection(&self)        -> Option<usize>      { self.selection }
    pub fn letter_focused(&self)   -> bool               { self.letter_focused }
    pub fn photo_count(&self)      -> usize              { self.photo_count }
    pub fn displayed_pose(&self)   -> PoseLabel          { self.debouncer.displayed() }
    pub fn hand_position(&self)    -> Option<(f32, f32)> { self.hand_position }
    pub fn debouncer(&self)        -> &PoseDebouncer     { &self.debouncer }
    pub fn machine(&self)          -> &ModeStateMachine  { &self.machine }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
