//! L3 Molecular Layer: Viewport reveal controller
//!
//! One controller acts as the shared intersection observer for a viewport
//! root. Elements subscribe with a threshold and an animation descriptor; the
//! host feeds intersection ratios and reads per-frame style values back.
//!
//! Subscriptions live exactly as long as their [`RevealHandle`]. Dropping the
//! handle unobserves the element synchronously and turns its liveness token
//! stale, so entries or callbacks queued for it are discarded.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use tracing::debug;

use super::easing::EasingType;
use super::gate::ReducedMotionGate;
use super::timing::{is_complete_at, lerp, progress_at};
use crate::config::RevealConfig;
use crate::dom::ElementId;
use crate::lifecycle::{Liveness, LivenessToken};

/// Presentation values written by reveal transitions
///
/// Only opacity and transforms; never layout-affecting geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleValues {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl StyleValues {
    /// Fully visible, untransformed
    pub const VISIBLE: StyleValues = StyleValues {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn lerp(&self, to: &StyleValues, t: f64) -> StyleValues {
        StyleValues {
            opacity: lerp(self.opacity, to.opacity, t),
            translate_x: lerp(self.translate_x, to.translate_x, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

impl Default for StyleValues {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Plain-data description of a reveal transition
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDescriptor {
    pub from: StyleValues,
    pub to: StyleValues,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EasingType,
}

impl AnimationDescriptor {
    /// Fade in while rising by `offset_y`
    pub fn fade_up(offset_y: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            from: StyleValues {
                opacity: 0.0,
                translate_y: offset_y,
                ..StyleValues::VISIBLE
            },
            to: StyleValues::VISIBLE,
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    /// Fade in from a slightly smaller scale
    pub fn zoom_in(from_scale: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            from: StyleValues {
                opacity: 0.0,
                scale: from_scale,
                ..StyleValues::VISIBLE
            },
            to: StyleValues::VISIBLE,
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::fade_up(
            config.offset_y,
            Duration::from_millis(config.duration_ms),
            config.easing,
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay for the `index`-th sibling of a staggered group
    pub fn staggered(self, index: usize, step: Duration) -> Self {
        let delay = step.saturating_mul(index as u32);
        self.with_delay(delay)
    }
}

type RevealCallback = Box<dyn FnMut(ElementId)>;

/// Subscription parameters
pub struct RevealOptions {
    threshold: f64,
    animation: AnimationDescriptor,
    repeatable: bool,
    on_reveal: Option<RevealCallback>,
}

impl fmt::Debug for RevealOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealOptions")
            .field("threshold", &self.threshold)
            .field("animation", &self.animation)
            .field("repeatable", &self.repeatable)
            .field("on_reveal", &self.on_reveal.is_some())
            .finish()
    }
}

impl RevealOptions {
    /// Default threshold of 15% visibility
    pub const DEFAULT_THRESHOLD: f64 = 0.15;

    pub fn new(animation: AnimationDescriptor) -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            animation,
            repeatable: false,
            on_reveal: None,
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(AnimationDescriptor::from_config(config))
            .threshold(config.threshold)
            .repeatable(config.repeatable)
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    pub fn animation(mut self, animation: AnimationDescriptor) -> Self {
        self.animation = animation;
        self
    }

    /// Called each time the reveal fires
    pub fn on_reveal<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ElementId) + 'static,
    {
        self.on_reveal = Some(Box::new(callback));
        self
    }
}

/// Intersection signal for one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Visible fraction of the element (0.0-1.0)
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, ratio: f64) -> Self {
        Self { target, ratio }
    }
}

/// Reads current visibility for the initial check on subscribe
pub trait ViewportProbe {
    /// `None` when the platform has no intersection support
    fn visible_ratio(&self, element: ElementId) -> Option<f64>;
}

impl<F> ViewportProbe for F
where
    F: Fn(ElementId) -> Option<f64>,
{
    fn visible_ratio(&self, element: ElementId) -> Option<f64> {
        self(element)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hidden,
    Animating { start: Instant },
    Revealed,
}

struct Subscription {
    key: u64,
    threshold: f64,
    animation: AnimationDescriptor,
    repeatable: bool,
    phase: Phase,
    fired: u32,
    on_reveal: Option<RevealCallback>,
    token: LivenessToken,
}

impl Subscription {
    fn meets(&self, ratio: f64) -> bool {
        if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }

    fn can_fire(&self) -> bool {
        self.phase == Phase::Hidden && (self.repeatable || self.fired == 0)
    }

    fn fire(&mut self, now: Instant, reduced: bool) {
        self.fired += 1;
        self.phase = if reduced || self.animation.duration.is_zero() {
            Phase::Revealed
        } else {
            Phase::Animating {
                start: now + self.animation.delay,
            }
        };
    }
}

#[derive(Default)]
struct Inner {
    subs: HashMap<ElementId, Subscription>,
    next_key: u64,
}

impl Inner {
    /// Drop subscriptions whose handle died without reaching the controller
    fn purge_dead(&mut self) {
        self.subs.retain(|element, sub| {
            let alive = sub.token.is_alive();
            if !alive {
                debug!(%element, "Purging stale reveal subscription");
            }
            alive
        });
    }
}

/// Shared observer for one viewport root
pub struct RevealController {
    root: Option<ElementId>,
    gate: ReducedMotionGate,
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for RevealController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealController")
            .field("root", &self.root)
            .field("observed", &self.observed_count())
            .finish()
    }
}

impl RevealController {
    /// Controller observing the viewport
    pub fn new(gate: ReducedMotionGate) -> Self {
        Self {
            root: None,
            gate,
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Controller observing a scroll container
    pub fn with_root(gate: ReducedMotionGate, root: ElementId) -> Self {
        Self {
            root: Some(root),
            ..Self::new(gate)
        }
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Observe `element`; an element already past the threshold fires now
    ///
    /// An existing subscription for the same element is disposed first.
    #[must_use = "the element is unobserved when the handle is dropped"]
    pub fn subscribe(
        &self,
        element: ElementId,
        options: RevealOptions,
        probe: &dyn ViewportProbe,
        now: Instant,
    ) -> RevealHandle {
        let liveness = Liveness::new();
        let reduced = self.gate.is_reduced();
        let initial = probe.visible_ratio(element);

        let fired = {
            let mut inner = self.inner.borrow_mut();
            inner.purge_dead();
            inner.next_key += 1;
            let key = inner.next_key;

            let mut sub = Subscription {
                key,
                threshold: options.threshold,
                animation: options.animation,
                repeatable: options.repeatable,
                phase: Phase::Hidden,
                fired: 0,
                on_reveal: options.on_reveal,
                token: liveness.token(),
            };

            let fire = match initial {
                // No intersection support: show content, skip the transition
                None => {
                    sub.fire(now, true);
                    true
                }
                Some(ratio) if sub.meets(ratio) => {
                    sub.fire(now, reduced);
                    true
                }
                Some(_) => false,
            };

            if let Some(previous) = inner.subs.insert(element, sub) {
                debug!(%element, old = previous.key, "Replaced existing reveal subscription");
            }
            (key, fire)
        };

        let (key, fire) = fired;
        if fire {
            self.dispatch(&[element]);
        }

        RevealHandle {
            element,
            key,
            inner: Rc::downgrade(&self.inner),
            liveness,
        }
    }

    /// Apply a batch of intersection signals from the platform
    pub fn on_intersections(&self, entries: &[IntersectionEntry], now: Instant) {
        let reduced = self.gate.is_reduced();
        let mut fired = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            inner.purge_dead();
            for entry in entries {
                let Some(sub) = inner.subs.get_mut(&entry.target) else {
                    // Element was unobserved after the signal was queued
                    continue;
                };
                if sub.meets(entry.ratio) {
                    if sub.can_fire() {
                        sub.fire(now, reduced);
                        fired.push(entry.target);
                    }
                } else if sub.repeatable && sub.phase != Phase::Hidden {
                    sub.phase = Phase::Hidden;
                }
            }
        }
        self.dispatch(&fired);
    }

    /// Style values for `element` at frame time `now`
    ///
    /// Returns `None` for elements that are not observed.
    pub fn style_at(&self, element: ElementId, now: Instant) -> Option<StyleValues> {
        let reduced = self.gate.is_reduced();
        let mut inner = self.inner.borrow_mut();
        let sub = inner.subs.get_mut(&element)?;
        if !sub.token.is_alive() {
            return None;
        }
        if reduced {
            // Content never waits on motion
            if let Phase::Animating { .. } = sub.phase {
                sub.phase = Phase::Revealed;
            }
            return Some(sub.animation.to);
        }
        let style = match sub.phase {
            Phase::Hidden => sub.animation.from,
            Phase::Revealed => sub.animation.to,
            Phase::Animating { start } => {
                if is_complete_at(start, sub.animation.duration, now) {
                    sub.phase = Phase::Revealed;
                    sub.animation.to
                } else {
                    let t = sub.animation.easing.apply(progress_at(start, sub.animation.duration, now));
                    sub.animation.from.lerp(&sub.animation.to, t)
                }
            }
        };
        Some(style)
    }

    /// Whether the element has reached (or is animating towards) its final state
    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.inner
            .borrow()
            .subs
            .get(&element)
            .is_some_and(|s| s.phase != Phase::Hidden)
    }

    /// How many times the element's reveal fired during this mount
    pub fn fire_count(&self, element: ElementId) -> u32 {
        self.inner
            .borrow()
            .subs
            .get(&element)
            .map(|s| s.fired)
            .unwrap_or(0)
    }

    /// Whether any transition is still running at `now` (host needs frames)
    pub fn needs_frames(&self, now: Instant) -> bool {
        if self.gate.is_reduced() {
            return false;
        }
        self.inner.borrow().subs.values().any(|s| match s.phase {
            Phase::Animating { start } => !is_complete_at(start, s.animation.duration, now),
            _ => false,
        })
    }

    /// Elements the platform should report intersections for
    pub fn observed(&self) -> Vec<ElementId> {
        let mut elements: Vec<_> = self
            .inner
            .borrow()
            .subs
            .iter()
            .filter(|(_, s)| s.token.is_alive())
            .map(|(e, _)| *e)
            .collect();
        elements.sort();
        elements
    }

    pub fn observed_count(&self) -> usize {
        self.inner
            .borrow()
            .subs
            .values()
            .filter(|s| s.token.is_alive())
            .count()
    }

    /// Run reveal callbacks outside the borrow so they may call back in
    fn dispatch(&self, elements: &[ElementId]) {
        for element in elements {
            let taken = {
                let mut inner = self.inner.borrow_mut();
                inner
                    .subs
                    .get_mut(element)
                    .and_then(|s| s.on_reveal.take().map(|cb| (s.key, s.token.clone(), cb)))
            };
            let Some((key, token, mut callback)) = taken else {
                continue;
            };
            if !token.is_alive() {
                debug!(%element, "Skipping reveal callback for unmounted element");
                continue;
            }
            callback(*element);
            if let Some(sub) = self.inner.borrow_mut().subs.get_mut(element) {
                if sub.key == key {
                    sub.on_reveal = Some(callback);
                }
            }
        }
    }
}

/// Owns one reveal subscription
pub struct RevealHandle {
    element: ElementId,
    key: u64,
    inner: Weak<RefCell<Inner>>,
    liveness: Liveness,
}

impl fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealHandle")
            .field("element", &self.element)
            .field("alive", &self.liveness.is_alive())
            .finish()
    }
}

impl RevealHandle {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Token for work deferred on behalf of this subscription
    pub fn token(&self) -> LivenessToken {
        self.liveness.token()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.liveness.kill();
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        // A busy controller purges the dead subscription on its next call
        if let Ok(mut inner) = inner.try_borrow_mut() {
            if inner.subs.get(&self.element).is_some_and(|s| s.key == self.key) {
                inner.subs.remove(&self.element);
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReducedMotionMode;
    use std::cell::Cell;

    fn descriptor() -> AnimationDescriptor {
        AnimationDescriptor::fade_up(24.0, Duration::from_millis(400), EasingType::Linear)
    }

    fn hidden(_: ElementId) -> Option<f64> {
        Some(0.0)
    }

    fn unsupported(_: ElementId) -> Option<f64> {
        None
    }

    fn visible(ratio: f64) -> impl Fn(ElementId) -> Option<f64> {
        move |_| Some(ratio)
    }

    #[test]
    fn test_visible_at_mount_fires_without_scroll() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let now = Instant::now();
        let handle = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &visible(0.6), now);

        assert_eq!(controller.fire_count(ElementId(1)), 1);
        assert!(controller.is_revealed(handle.element()));
    }

    #[test]
    fn test_below_threshold_waits() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let now = Instant::now();
        let _handle = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &visible(0.1), now);
        assert_eq!(controller.fire_count(ElementId(1)), 0);

        let style = controller.style_at(ElementId(1), now).unwrap();
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.translate_y, 24.0);
    }

    #[test]
    fn test_transition_interpolates_then_settles() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let start = Instant::now();
        let _handle = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &hidden, start);
        controller.on_intersections(&[IntersectionEntry::new(ElementId(1), 0.5)], start);

        let mid = controller.style_at(ElementId(1), start + Duration::from_millis(200)).unwrap();
        assert!((mid.opacity - 0.5).abs() < 1e-9);
        assert!((mid.translate_y - 12.0).abs() < 1e-9);
        assert!(controller.needs_frames(start + Duration::from_millis(200)));

        let end = controller.style_at(ElementId(1), start + Duration::from_millis(400)).unwrap();
        assert_eq!(end, StyleValues::VISIBLE);
        assert!(!controller.needs_frames(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_delay_holds_initial_state() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let start = Instant::now();
        let options = RevealOptions::new(descriptor().with_delay(Duration::from_millis(100)));
        let _handle = controller.subscribe(ElementId(1), options, &visible(1.0), start);

        let style = controller.style_at(ElementId(1), start + Duration::from_millis(50)).unwrap();
        assert_eq!(style.opacity, 0.0);
    }

    #[test]
    fn test_repeatable_resets_and_fires_again() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let now = Instant::now();
        let options = RevealOptions::new(descriptor()).repeatable(true);
        let _handle = controller.subscribe(ElementId(1), options, &hidden, now);

        controller.on_intersections(&[IntersectionEntry::new(ElementId(1), 1.0)], now);
        controller.on_intersections(&[IntersectionEntry::new(ElementId(1), 0.0)], now);
        assert!(!controller.is_revealed(ElementId(1)));
        controller.on_intersections(&[IntersectionEntry::new(ElementId(1), 1.0)], now);
        assert_eq!(controller.fire_count(ElementId(1)), 2);
    }

    #[test]
    fn test_unsupported_probe_reveals_immediately() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let now = Instant::now();
        let _handle = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &unsupported, now);
        assert_eq!(controller.style_at(ElementId(1), now), Some(StyleValues::VISIBLE));
    }

    #[test]
    fn test_drop_unobserves_and_ignores_stale_entries() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let options = RevealOptions::new(descriptor()).on_reveal(move |_| h.set(h.get() + 1));
        let handle = controller.subscribe(ElementId(1), options, &hidden, Instant::now());
        assert_eq!(controller.observed(), vec![ElementId(1)]);

        drop(handle);
        assert_eq!(controller.observed_count(), 0);
        controller.on_intersections(&[IntersectionEntry::new(ElementId(1), 1.0)], Instant::now());
        assert_eq!(hits.get(), 0);
        assert_eq!(controller.style_at(ElementId(1), Instant::now()), None);
    }

    #[test]
    fn test_resubscribe_replaces_previous() {
        let controller = RevealController::new(ReducedMotionGate::default());
        let now = Instant::now();
        let first = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &hidden, now);
        let _second = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &hidden, now);
        assert_eq!(controller.observed_count(), 1);

        // Dropping the replaced handle must not remove the new subscription
        drop(first);
        assert_eq!(controller.observed_count(), 1);
    }

    #[test]
    fn test_callback_may_reenter_controller() {
        let controller = Rc::new(RevealController::new(ReducedMotionGate::default()));
        let seen = Rc::new(Cell::new(false));
        let c = Rc::clone(&controller);
        let s = Rc::clone(&seen);
        let options = RevealOptions::new(descriptor()).on_reveal(move |element| {
            s.set(c.is_revealed(element));
        });
        let _handle = controller.subscribe(ElementId(1), options, &visible(1.0), Instant::now());
        assert!(seen.get());
    }

    #[test]
    fn test_reduced_motion_applies_final_state() {
        let gate = ReducedMotionGate::new(ReducedMotionMode::Always);
        let controller = RevealController::new(gate);
        let now = Instant::now();
        let _handle = controller.subscribe(ElementId(1), RevealOptions::new(descriptor()), &hidden, now);

        assert_eq!(controller.style_at(ElementId(1), now), Some(StyleValues::VISIBLE));
        assert!(!controller.needs_frames(now));
    }
}
