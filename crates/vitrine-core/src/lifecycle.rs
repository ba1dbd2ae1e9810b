//! Mount lifetimes and deferred work
//!
//! Every component that schedules deferred work owns a [`Liveness`]. Deferred
//! callbacks capture a [`LivenessToken`] and check it before touching state,
//! so work queued before an unmount is discarded instead of applied.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

/// Owner side of a mount lifetime; killed explicitly or on drop
#[derive(Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Token for a deferred callback
    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the owner unmounted; outstanding tokens turn stale
    pub fn kill(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Callback side of a mount lifetime
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessToken {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Handle returned by [`FrameScheduler::request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

type FrameCallback = Box<dyn FnOnce(Instant)>;

struct PendingFrame {
    id: FrameRequestId,
    token: LivenessToken,
    callback: FrameCallback,
}

/// One-shot animation-frame callbacks
///
/// Callbacks requested while a frame runs are deferred to the next frame.
#[derive(Default)]
pub struct FrameScheduler {
    next_id: u64,
    queue: Vec<PendingFrame>,
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` for the next frame, guarded by `token`
    pub fn request<F>(&mut self, token: LivenessToken, callback: F) -> FrameRequestId
    where
        F: FnOnce(Instant) + 'static,
    {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.queue.push(PendingFrame {
            id,
            token,
            callback: Box::new(callback),
        });
        id
    }

    /// Cancel a pending callback; returns false if it already ran or never existed
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|p| p.id != id);
        self.queue.len() != before
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Run every callback queued before this frame; returns how many ran
    pub fn run(&mut self, now: Instant) -> usize {
        let frame = std::mem::take(&mut self.queue);
        let mut ran = 0;
        for pending in frame {
            if pending.token.is_alive() {
                (pending.callback)(now);
                ran += 1;
            } else {
                debug!(request = pending.id.0, "Dropping frame callback for unmounted owner");
            }
        }
        ran
    }
}
