//! L4 Atomic Layer: Time calculation utilities for transitions
//!
//! Transitions are stored as (start, duration) and evaluated per frame against
//! the frame timestamp, so nothing ever waits on a timer.

use std::time::{Duration, Instant};

/// Calculate transition progress (0.0 to 1.0) at frame time `now`
///
/// Frames stamped before `start` (delayed transitions) report 0.0.
#[inline]
pub fn progress_at(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return if now >= start { 1.0 } else { 0.0 };
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if a transition is complete at frame time `now`
#[inline]
pub fn is_complete_at(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration && now >= start
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Map `value` from one range to another, optionally clamping to the input range
#[inline]
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64), clamp: bool) -> f64 {
    let span = input.1 - input.0;
    let mut t = if span.abs() < f64::EPSILON {
        if value >= input.1 {
            1.0
        } else {
            0.0
        }
    } else {
        (value - input.0) / span
    };
    if clamp {
        t = t.clamp(0.0, 1.0);
    }
    lerp(output.0, output.1, t)
}
