//! # hand_pose
//!
//! Turn per-frame hand landmarks into discrete, debounced poses.
//!
//! ```text
//! HandFrame ──► GestureClassifier ──► PoseLabel ──► PoseDebouncer ──► confirmed?
//! ```
//!
//! | Pose | Rule (normalized camera units) |
//! |---|---|
//! | `CLOSED` | mean fingertip→wrist distance < 0.16 |
//! | `PINCH`  | thumb tip→index tip distance < 0.05 (checked after `CLOSED`) |
//! | `OPEN`   | anything else |
//! | `NONE`   | no hand in the frame |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_pose::{GestureClassifier, PoseDebouncer, DebounceConfig, HandFrame, PoseLabel};
//!
//! let classifier = GestureClassifier::default();
//! let mut debouncer = PoseDebouncer::new(DebounceConfig::default());
//!
//! let open = HandFrame::synthetic(0.0, 0.5, 0.8, 0.3, None);
//! let mut confirmed = false;
//! for _ in 0..10 {
//!     confirmed = debouncer.observe(classifier.classify(&open)).confirmed;
//! }
//! assert!(confirmed);
//! assert_eq!(debouncer.current(), PoseLabel::Open);
//! ```

pub mod error;
pub mod landmarks;
pub mod classifier;
pub mod debounce;

pub use error::PoseError;
pub use landmarks::{HandFrame, Landmark, parse_frame_line, LANDMARK_COUNT};
pub use classifier::{GestureClassifier, HandMetrics, PoseLabel, PoseThresholds};
pub use debounce::{DebounceConfig, DebounceOutcome, DebounceState, PoseDebouncer};
