//! L3 Molecular Layer: Stat counters that count up once revealed

use std::time::{Duration, Instant};

use super::easing::EasingType;
use super::gate::ReducedMotionGate;
use super::timing::{is_complete_at, lerp, progress_at};

/// Numeric counter animated from zero to `target`
#[derive(Debug, Clone)]
pub struct CountUp {
    target: f64,
    duration: Duration,
    easing: EasingType,
    gate: ReducedMotionGate,
    start: Option<Instant>,
}

impl CountUp {
    pub fn new(target: f64, duration: Duration, easing: EasingType, gate: ReducedMotionGate) -> Self {
        Self {
            target,
            duration,
            easing,
            gate,
            start: None,
        }
    }

    /// Start counting; later calls keep the original start
    pub fn start(&mut self, now: Instant) {
        self.start.get_or_insert(now);
    }

    /// Start when the owning element is revealed
    pub fn sync(&mut self, revealed: bool, now: Instant) {
        if revealed {
            self.start(now);
        }
    }

    pub fn has_started(&self) -> bool {
        self.start.is_some()
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(start) = self.start else {
            return 0.0;
        };
        if self.gate.is_reduced() {
            return self.target;
        }
        let t = self.easing.apply(progress_at(start, self.duration, now));
        lerp(0.0, self.target, t)
    }

    /// Rounded value for display
    pub fn display_at(&self, now: Instant) -> i64 {
        self.value_at(now).round() as i64
    }

    pub fn is_running(&self, now: Instant) -> bool {
        match self.start {
            Some(start) => !self.gate.is_reduced() && !is_complete_at(start, self.duration, now),
            None => false,
        }
    }
}
