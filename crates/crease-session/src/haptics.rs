//! Best-effort tactile feedback.
//!
//! Pulses are fire-and-forget: implementations swallow every failure, and a
//! host without the capability simply does nothing.

use std::io::Write;
use std::sync::Mutex;

/// Class of event a pulse acknowledges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticClass {
    Light,
    Medium,
    Heavy,
    Error,
    Success,
}

impl HapticClass {
    /// Vibration pattern in milliseconds, alternating on/off.
    pub fn pattern(&self) -> &'static [u64] {
        match self {
            Self::Light => &[40],
            Self::Medium => &[70],
            Self::Heavy => &[150],
            Self::Error => &[50, 50, 50],
            Self::Success => &[40, 30, 40],
        }
    }
}

pub trait HapticFeedback: Send + Sync {
    fn pulse(&self, class: HapticClass);
}

impl<H: HapticFeedback + ?Sized> HapticFeedback for Box<H> {
    fn pulse(&self, class: HapticClass) {
        (**self).pulse(class)
    }
}

/// Host without haptics.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHaptics;

impl HapticFeedback for NoopHaptics {
    fn pulse(&self, _class: HapticClass) {}
}

/// Terminal stand-in: rings the bell once per "on" segment of the pattern.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalBell;

impl HapticFeedback for TerminalBell {
    fn pulse(&self, class: HapticClass) {
        let rings = class.pattern().iter().step_by(2).count();
        let mut err = std::io::stderr().lock();
        let _ = err.write_all("\x07".repeat(rings).as_bytes());
        let _ = err.flush();
    }
}

/// Records every pulse, for tests.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pulses: Mutex<Vec<HapticClass>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> Vec<HapticClass> {
        self.pulses.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl HapticFeedback for RecordingHaptics {
    fn pulse(&self, class: HapticClass) {
        if let Ok(mut pulses) = self.pulses.lock() {
            pulses.push(class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_match_event_weight() {
        assert_eq!(HapticClass::Light.pattern(), &[40]);
        assert_eq!(HapticClass::Heavy.pattern(), &[150]);
        assert_eq!(HapticClass::Error.pattern(), &[50, 50, 50]);
    }

    #[test]
    fn boxed_feedback_forwards() {
        let boxed: Box<dyn HapticFeedback> = Box::new(NoopHaptics);
        boxed.pulse(HapticClass::Medium);
    }

    #[test]
    fn recording_keeps_order() {
        let haptics = RecordingHaptics::new();
        haptics.pulse(HapticClass::Light);
        haptics.pulse(HapticClass::Heavy);
        assert_eq!(haptics.pulses(), vec![HapticClass::Light, HapticClass::Heavy]);
    }
}
