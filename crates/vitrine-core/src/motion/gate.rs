//! L4 Atomic Layer: Reduced-motion gate
//!
//! One process-wide boolean every animated component reads before starting
//! non-essential motion. Updates are pushed through a watch channel so
//! subscribers react mid-session.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::config::ReducedMotionMode;

/// Platform accessibility preference reader
pub trait PreferenceSource {
    /// `None` when the platform cannot report the preference
    fn prefers_reduced_motion(&self) -> Option<bool>;
}

/// Fixed preference value
#[derive(Debug, Clone, Copy)]
pub struct StaticPreference(pub Option<bool>);

impl PreferenceSource for StaticPreference {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.0
    }
}

impl<F> PreferenceSource for F
where
    F: Fn() -> Option<bool>,
{
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self()
    }
}

/// Reduced-motion preference shared by all components
#[derive(Debug, Clone)]
pub struct ReducedMotionGate {
    mode: ReducedMotionMode,
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ReducedMotionGate {
    fn default() -> Self {
        Self::new(ReducedMotionMode::Auto)
    }
}

impl ReducedMotionGate {
    /// Gate with an unknown platform preference (motion allowed in auto mode)
    pub fn new(mode: ReducedMotionMode) -> Self {
        let (tx, _rx) = watch::channel(Self::effective(mode, false));
        Self {
            mode,
            tx: Arc::new(tx),
        }
    }

    /// Gate seeded from a platform source
    pub fn from_source(mode: ReducedMotionMode, source: &dyn PreferenceSource) -> Self {
        let gate = Self::new(mode);
        gate.refresh(source);
        gate
    }

    /// Current value: true means apply end states instantly
    #[inline]
    pub fn is_reduced(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn mode(&self) -> ReducedMotionMode {
        self.mode
    }

    /// Receiver notified whenever the effective value flips
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Re-read the platform preference
    pub fn refresh(&self, source: &dyn PreferenceSource) {
        self.set_platform_preference(source.prefers_reduced_motion());
    }

    /// Apply a platform preference change; unreadable values fail open
    pub fn set_platform_preference(&self, preference: Option<bool>) {
        let platform = match preference {
            Some(value) => value,
            None => {
                debug!("Reduced-motion preference unreadable, assuming motion is allowed");
                false
            }
        };
        let next = Self::effective(self.mode, platform);
        let changed = self.tx.send_if_modified(|current| {
            if *current != next {
                *current = next;
                true
            } else {
                false
            }
        });
        if changed {
            debug!(reduced = next, "Reduced-motion preference changed");
        }
    }

    fn effective(mode: ReducedMotionMode, platform: bool) -> bool {
        match mode {
            ReducedMotionMode::Auto => platform,
            ReducedMotionMode::Always => true,
            ReducedMotionMode::Never => false,
        }
    }
}
