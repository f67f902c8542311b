use std::time::Duration;

use thiserror::Error;

use crate::mode::InteractionMode;

/// Why a requested mode change was not applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("already in {0}")]
    SameMode(InteractionMode),

    #[error("transition lock engaged for another {remaining:?}")]
    CoolingDown { remaining: Duration },
}
