//! Two-press confirmation for destructive actions.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Armed { deadline: Instant },
}

/// What a press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// First press: waiting for confirmation until `deadline`.
    Armed { deadline: Instant },
    /// Second press inside the window: go ahead.
    Confirmed,
}

/// Reset confirmation state machine.
///
/// The first press arms, a second press before the deadline confirms.
/// A press after the deadline counts as a fresh first press. Time is always
/// passed in, so the machine itself never sleeps.
#[derive(Clone, Debug)]
pub struct ResetGuard {
    window: Duration,
    state: GuardState,
}

impl ResetGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: GuardState::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_armed(&self, now: Instant) -> bool {
        matches!(self.state, GuardState::Armed { deadline } if now <= deadline)
    }

    pub fn press(&mut self, now: Instant) -> PressOutcome {
        match self.state {
            GuardState::Armed { deadline } if now <= deadline => {
                self.state = GuardState::Idle;
                PressOutcome::Confirmed
            }
            _ => {
                let deadline = now + self.window;
                self.state = GuardState::Armed { deadline };
                PressOutcome::Armed { deadline }
            }
        }
    }

    /// Return to idle. Returns `true` if the guard was armed.
    pub fn disarm(&mut self) -> bool {
        let was_armed = matches!(self.state, GuardState::Armed { .. });
        self.state = GuardState::Idle;
        was_armed
    }
}

impl Default for ResetGuard {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
