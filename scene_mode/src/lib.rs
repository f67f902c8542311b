//! # scene_mode
//!
//! The interaction state shared between the gesture loop and the render loop.
//!
//! ```text
//!  gesture loop                      render loop
//!  ────────────                      ───────────
//!  HandFrame ─► classify ─► debounce  render_tick(dt) ─► progress
//!                 │                        ▲
//!                 ▼                        │
//!          ModeStateMachine ◄── pointer ── InteractionSession ──► scroll, selection
//! ```
//!
//! ## Modes
//!
//! | Mode | Scene |
//! |---|---|
//! | `TREE` | particles gathered into the tree (progress → 1) |
//! | `UNLEASHED` | particles scattered (progress → 0) |
//! | `CAROUSEL` | photos on an arc, scrolled by the open hand |
//! | `FOCUS` | one photo, or the letter, pulled up to the camera |
//!
//! Mode changes from any origin are spaced by a cooldown (1 s by default)
//! and every accepted change resets the pose debouncer.

pub mod error;
pub mod mode;
pub mod lock;
pub mod machine;
pub mod smoothing;
pub mod session;

pub use error::TransitionError;
pub use mode::InteractionMode;
pub use lock::{TransitionLock, DEFAULT_COOLDOWN};
pub use machine::{nearest_index, ModeRequest, ModeStateMachine, TransitionContext};
pub use smoothing::{ProgressAnimator, ScrollMapper, Smoothing};
pub use session::{
    GestureReport, InteractionSession, SessionConfig, SessionEvent, TransitionOrigin,
};
