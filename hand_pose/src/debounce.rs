//! Frame-run debouncing of raw pose labels.
//!
//! Landmark detection jitters from frame to frame, so a label only counts
//! once it has been seen on a run of consecutive frames:
//!
//! * after `display_frames` the displayed pose (UI feedback) switches;
//! * after `required_frames` the pose is *confirmed* and may drive a mode
//!   change.

use crate::classifier::PoseLabel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceConfig {
    pub display_frames:  u32,
    pub required_frames: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        DebounceConfig { display_frames: 3, required_frames: 10 }
    }
}

/// `{label, consecutive_count}` — the run currently being counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebounceState {
    pub label: PoseLabel,
    pub count: u32,
}

/// What one call to [`PoseDebouncer::observe`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceOutcome {
    pub label:           PoseLabel,
    pub count:           u32,
    pub confirmed:       bool,
    /// True on the frame where the displayed pose switched to `label`.
    pub display_changed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PoseDebouncer {
    config:    DebounceConfig,
    state:     DebounceState,
    displayed: PoseLabel,
}

impl PoseDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        PoseDebouncer {
            config,
            state:     DebounceState::default(),
            displayed: PoseLabel::None,
        }
    }

    pub fn observe(&mut self, label: PoseLabel) -> DebounceOutcome {
        if self.state.label == label {
            self.state.count = self.state.count.saturating_add(1);
        } else {
            self.state = DebounceState { label, count: 1 };
        }

        let display_changed = self.state.count == self.config.display_frames
            && self.displayed != label;
        if display_changed {
            self.displayed = label;
        }

        DebounceOutcome {
            label,
            count: self.state.count,
            confirmed: self.is_confirmed(),
            display_changed,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.state.count >= self.config.required_frames
    }

    /// Forget the current run.  Called after every mode change so the pose
    /// that caused it cannot immediately fire again.
    pub fn reset(&mut self) {
        self.state = DebounceState::default();
    }

    /// Hand lost: forget the run and blank the displayed pose.
    pub fn clear(&mut self) {
        self.reset();
        self.displayed = PoseLabel::None;
    }

    pub fn state(&self)     -> DebounceState  { self.state }
    pub fn current(&self)   -> PoseLabel      { self.state.label }
    pub fn displayed(&self) -> PoseLabel      { self.displayed }
    pub fn config(&self)    -> DebounceConfig { self.config }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
