//! Hand landmark frames in normalized camera space.
//!
//! A [`HandFrame`] is one detection of one hand: 21 points following the
//! MediaPipe hand topology, with `x`/`y` in `[0, 1]` (origin top-left, `y`
//! pointing down) and a relative depth `z`.  Frames are produced once per
//! video frame by whatever landmark model sits upstream and are consumed
//! immediately.

use crate::error::{PoseError, Result};

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP:   usize = 16;
pub const PINKY_TIP:  usize = 20;

/// The five fingertips, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Planar distance; depth is too noisy to take part in classification.
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn lerp(&self, other: &Landmark, t: f32) -> Landmark {
        Landmark {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One hand detection.  Absence of a hand is modelled as `Option<HandFrame>`.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    /// Capture time in milliseconds on the producer's clock.
    pub timestamp_ms: f64,
    pub landmarks:    [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(timestamp_ms: f64, landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandFrame { timestamp_ms, landmarks }
    }

    /// Build a frame from a flat `x, y, z, x, y, z, …` slice.
    ///
    /// Extra trailing values are ignored; fewer than 21 complete points is an
    /// error.
    pub fn from_flat(timestamp_ms: f64, flat: &[f32]) -> Result<Self> {
        let points = flat.len() / 3;
        if points < LANDMARK_COUNT {
            return Err(PoseError::TooFewLandmarks {
                expected: LANDMARK_COUNT,
                actual:   points,
            });
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            let base = i * 3;
            *lm = Landmark::new(flat[base], flat[base + 1], flat[base + 2]);
        }
        Ok(HandFrame { timestamp_ms, landmarks })
    }

    pub fn wrist(&self) -> &Landmark { &self.landmarks[WRIST] }

    pub fn landmark(&self, index: usize) -> &Landmark { &self.landmarks[index] }

    /// Wrist position mirrored horizontally, as seen by a user facing a
    /// selfie camera.  Returned as `(x, y)` in `[0, 1]`.
    pub fn mirrored_wrist(&self) -> (f32, f32) {
        let w = self.wrist();
        (1.0 - w.x, w.y)
    }

    /// Synthesize a plausible hand for simulation and tests.
    ///
    /// Every fingertip is placed exactly `reach` away from the wrist, fanned
    /// upward, so the mean tip distance equals `reach`.  With
    /// `thumb_gap = Some(g)` the thumb tip is swung next to the index tip so
    /// that the two are `g` apart; otherwise the thumb is spread out.
    pub fn synthetic(
        timestamp_ms: f64,
        wrist_x:      f32,
        wrist_y:      f32,
        reach:        f32,
        thumb_gap:    Option<f32>,
    ) -> Self {
        // Angles measured from straight up (-y), positive toward +x.
        const FINGER_ANGLES: [f32; 4] = [-0.30, -0.10, 0.10, 0.30];
        const THUMB_OPEN_ANGLE: f32 = -0.90;

        let wrist = Landmark::new(wrist_x, wrist_y, 0.0);
        let at = |angle: f32| Landmark::new(
            wrist_x + reach * angle.sin(),
            wrist_y - reach * angle.cos(),
            0.0,
        );

        let thumb_angle = match thumb_gap {
            Some(gap) if reach > 0.0 => {
                let half = (gap / (2.0 * reach)).clamp(0.0, 1.0);
                FINGER_ANGLES[0] - 2.0 * half.asin()
            }
            _ => THUMB_OPEN_ANGLE,
        };

        let tips = [
            at(thumb_angle),
            at(FINGER_ANGLES[0]),
            at(FINGER_ANGLES[1]),
            at(FINGER_ANGLES[2]),
            at(FINGER_ANGLES[3]),
        ];

        let mut landmarks = [wrist; LANDMARK_COUNT];
        for (finger, tip) in tips.iter().enumerate() {
            let first = 1 + finger * 4;
            for joint in 0..3 {
                let t = (joint + 1) as f32 * 0.25;
                landmarks[first + joint] = wrist.lerp(tip, t);
            }
            landmarks[FINGERTIPS[finger]] = *tip;
        }
        HandFrame { timestamp_ms, landmarks }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Text format — one frame per line
// ════════════════════════════════════════════════════════════════════════════

/// Parse one line of a landmark recording.
///
/// An empty line or a lone `-` means "no hand detected".  Otherwise the line
/// holds at least 63 numbers separated by whitespace or commas.  `line_no` is
/// 1-based and only used for error reporting.
pub fn parse_frame_line(line: &str, line_no: usize, timestamp_ms: f64) -> Result<Option<HandFrame>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }

    let values = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.parse::<f32>().map_err(|e| PoseError::Parse {
            line:    line_no,
            message: format!("bad number {:?}: {}", tok, e),
        }))
        .collect::<Result<Vec<f32>>>()?;

    HandFrame::from_flat(timestamp_ms, &values)
        .map(Some)
        .map_err(|e| PoseError::Parse { line: line_no, message: e.to_string() })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_requires_21_points() {
        let err = HandFrame::from_flat(0.0, &[0.5; 60]).unwrap_err();
        assert!(matches!(err, PoseError::TooFewLandmarks { expected: 21, actual: 20 }));
        assert!(HandFrame::from_flat(0.0, &[0.5; 63]).is_ok());
    }

    #[test]
    fn from_flat_keeps_order() {
        let flat: Vec<f32> = (0..63).map(|i| i as f32).collect();
        let f = HandFrame::from_flat(1.0, &flat).unwrap();
        assert_eq!(f.landmarks[0], Landmark::new(0.0, 1.0, 2.0));
        assert_eq!(f.landmarks[20], Landmark::new(60.0, 61.0, 62.0));
    }

    #[test]
    fn mirrored_wrist_flips_x_only() {
        let f = HandFrame::synthetic(0.0, 0.2, 0.7, 0.3, None);
        let (x, y) = f.mirrored_wrist();
        assert!((x - 0.8).abs() < 1e-6);
        assert!((y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn synthetic_tips_sit_at_reach() {
        let f = HandFrame::synthetic(0.0, 0.5, 0.8, 0.25, None);
        for &tip in FINGERTIPS.iter() {
            let d = f.landmark(tip).distance_2d(f.wrist());
            assert!((d - 0.25).abs() < 1e-5, "tip {} at {}", tip, d);
        }
    }

    #[test]
    fn synthetic_thumb_gap_is_exact() {
        let f = HandFrame::synthetic(0.0, 0.5, 0.8, 0.3, Some(0.02));
        let d = f.landmark(THUMB_TIP).distance_2d(f.landmark(INDEX_TIP));
        assert!((d - 0.02).abs() < 1e-4, "gap {}", d);
    }

    #[test]
    fn parse_empty_and_dash_mean_no_hand() {
        assert!(parse_frame_line("", 1, 0.0).unwrap().is_none());
        assert!(parse_frame_line("  -  ", 2, 0.0).unwrap().is_none());
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse_frame_line("0.1, 0.2, nope", 7, 0.0).unwrap_err();
        match err {
            PoseError::Parse { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parse_short_line_is_parse_error() {
        let err = parse_frame_line("0.1 0.2 0.3", 3, 0.0).unwrap_err();
        assert!(matches!(err, PoseError::Parse { line: 3, .. }));
    }

    #[test]
    fn parse_accepts_commas_and_spaces() {
        let line: Vec<String> = (0..63).map(|_| "0.5".to_string()).collect();
        let f = parse_frame_line(&line.join(", "), 1, 16.0).unwrap().unwrap();
        assert_eq!(f.timestamp_ms, 16.0);
        assert_eq!(f.wrist().x, 0.5);
    }
}
