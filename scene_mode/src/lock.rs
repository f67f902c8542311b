//! Minimum real-time spacing between accepted mode changes.

use std::time::{Duration, Instant};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug)]
pub struct TransitionLock {
    cooldown:    Duration,
    last_change: Option<Instant>,
}

impl Default for TransitionLock {
    fn default() -> Self { TransitionLock::new(DEFAULT_COOLDOWN) }
}

impl TransitionLock {
    pub fn new(cooldown: Duration) -> Self {
        TransitionLock { cooldown, last_change: None }
    }

    pub fn is_locked(&self, now: Instant) -> bool {
        self.remaining(now) > Duration::ZERO
    }

    /// Time left before the next transition may be accepted.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_change {
            Some(t) => self.cooldown.saturating_sub(now.saturating_duration_since(t)),
            None    => Duration::ZERO,
        }
    }

    pub fn stamp(&mut self, now: Instant) { self.last_change = Some(now); }

    pub fn last_change(&self) -> Option<Instant> { self.last_change }
    pub fn cooldown(&self)    -> Duration        { self.cooldown }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocked_before_first_stamp() {
        let lock = TransitionLock::default();
        assert!(!lock.is_locked(Instant::now()));
        assert_eq!(lock.last_change(), None);
    }

    #[test]
    fn locked_until_cooldown_elapses() {
        let t0 = Instant::now();
        let mut lock = TransitionLock::new(Duration::from_millis(1000));
        lock.stamp(t0);
        assert!(lock.is_locked(t0 + Duration::from_millis(999)));
        assert_eq!(lock.remaining(t0 + Duration::from_millis(400)), Duration::from_millis(600));
        assert!(!lock.is_locked(t0 + Duration::from_millis(1000)));
    }
}
