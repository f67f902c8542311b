//! Stateless pose classification.
//!
//! # Algorithm
//!
//! * `avg_tip_distance`: mean planar distance from each of the five
//!   fingertips to the wrist.
//! * `pinch_distance`: planar distance between thumb tip and index tip.
//!
//! The closed check runs before the pinch check, so a fist (whose thumb and
//! index tips are usually close together too) is never reported as a pinch.

use std::fmt;

use crate::landmarks::{HandFrame, FINGERTIPS, INDEX_TIP, THUMB_TIP};

// ════════════════════════════════════════════════════════════════════════════
// PoseLabel
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PoseLabel {
    Open,
    Closed,
    Pinch,
    #[default]
    None,
}

impl PoseLabel {
    pub fn name(self) -> &'static str {
        match self {
            PoseLabel::Open   => "OPEN",
            PoseLabel::Closed => "CLOSED",
            PoseLabel::Pinch  => "PINCH",
            PoseLabel::None   => "NONE",
        }
    }
}

impl fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Thresholds & metrics
// ════════════════════════════════════════════════════════════════════════════

/// Classification thresholds in normalized camera units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseThresholds {
    /// Mean tip-to-wrist distance below which the hand counts as a fist.
    pub closed: f32,
    /// Thumb-to-index distance below which the hand counts as pinching.
    pub pinch:  f32,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        PoseThresholds { closed: 0.16, pinch: 0.05 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandMetrics {
    pub avg_tip_distance: f32,
    pub pinch_distance:   f32,
}

impl HandMetrics {
    pub fn measure(frame: &HandFrame) -> Self {
        let wrist = frame.wrist();
        let sum: f32 = FINGERTIPS.iter()
            .map(|&tip| frame.landmark(tip).distance_2d(wrist))
            .sum();
        HandMetrics {
            avg_tip_distance: sum / FINGERTIPS.len() as f32,
            pinch_distance:   frame.landmark(THUMB_TIP).distance_2d(frame.landmark(INDEX_TIP)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureClassifier {
    pub thresholds: PoseThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: PoseThresholds) -> Self {
        GestureClassifier { thresholds }
    }

    pub fn classify(&self, frame: &HandFrame) -> PoseLabel {
        self.classify_metrics(HandMetrics::measure(frame))
    }

    pub fn classify_metrics(&self, m: HandMetrics) -> PoseLabel {
        if m.avg_tip_distance < self.thresholds.closed {
            PoseLabel::Closed
        } else if m.pinch_distance < self.thresholds.pinch {
            PoseLabel::Pinch
        } else {
            PoseLabel::Open
        }
    }

    /// `None` when no hand was detected; the classifier body is skipped.
    pub fn classify_optional(&self, frame: Option<&HandFrame>) -> PoseLabel {
        match frame {
            Some(f) => self.classify(f),
            None    => PoseLabel::None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
