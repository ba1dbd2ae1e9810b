//! L3 Molecular Layer: Magnetic (pointer-following) displacement
//!
//! The pointer sets a displacement target; a damped spring pulls the current
//! displacement towards it each frame. Leaving the element resets the target
//! and the spring relaxes back to rest.

use std::ops::{Add, Mul, Sub};
use std::time::Duration;

use super::gate::ReducedMotionGate;
use crate::config::MagneticConfig;
use crate::dom::Rect;

/// Largest integration step; longer frames are subdivided
const MAX_STEP_SECS: f64 = 1.0 / 120.0;
/// Distance and speed under which the spring counts as settled
const REST_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Pointer-following displacement for one element
#[derive(Debug, Clone)]
pub struct Magnetic {
    config: MagneticConfig,
    gate: ReducedMotionGate,
    coarse_pointer: bool,
    bounds: Rect,
    current: Vec2,
    velocity: Vec2,
    target: Vec2,
}

impl Magnetic {
    pub fn new(config: MagneticConfig, gate: ReducedMotionGate) -> Self {
        Self {
            config,
            gate,
            coarse_pointer: false,
            bounds: Rect::default(),
            current: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
        }
    }

    /// Element bounds in the same space as pointer coordinates
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Touch and other inputs without continuous tracking disable the effect
    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        self.coarse_pointer = coarse;
        if coarse {
            self.reset();
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.coarse_pointer && !self.gate.is_reduced()
    }

    /// Pointer moved; returns whether it is inside the element
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.bounds.contains(x, y) {
            self.pointer_leave();
            return false;
        }
        if !self.is_enabled() {
            return true;
        }
        let (cx, cy) = self.bounds.center();
        let mut target = Vec2::new(x - cx, y - cy) * self.config.strength;
        let length = target.length();
        if length > self.config.max_displacement && length > 0.0 {
            target = target * (self.config.max_displacement / length);
        }
        self.target = target;
        true
    }

    pub fn pointer_leave(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Advance the spring by `dt`; returns the displacement to render
    pub fn step(&mut self, dt: Duration) -> Vec2 {
        if !self.is_enabled() {
            self.reset();
            return Vec2::ZERO;
        }
        if self.is_settled() {
            return self.current;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let offset = self.current - self.target;
            let spring = offset * -self.config.stiffness;
            let damping = self.velocity * -self.config.damping;
            let accel = (spring + damping) * (1.0 / self.config.mass);
            // Semi-implicit Euler
            self.velocity = self.velocity + accel * h;
            self.current = self.current + self.velocity * h;
            remaining -= h;
        }

        if (self.current - self.target).length() < REST_EPSILON && self.velocity.length() < REST_EPSILON {
            self.current = self.target;
            self.velocity = Vec2::ZERO;
        }
        self.current
    }

    /// Displacement to render this frame
    pub fn displacement(&self) -> Vec2 {
        if self.is_enabled() {
            self.current
        } else {
            Vec2::ZERO
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// At rest on its target with no velocity (host can stop frames)
    pub fn is_settled(&self) -> bool {
        self.current == self.target && self.velocity.is_zero()
    }

    fn reset(&mut self) {
        self.current = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.target = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReducedMotionMode;

    fn magnetic() -> Magnetic {
        let mut m = Magnetic::new(MagneticConfig::default(), ReducedMotionGate::default());
        m.set_bounds(Rect::new(0.0, 0.0, 100.0, 40.0));
        m
    }

    fn run(m: &mut Magnetic, frames: usize) {
        for _ in 0..frames {
            m.step(Duration::from_millis(16));
        }
    }

    #[test]
    fn test_target_scaled_and_clamped() {
        let mut m = magnetic();
        // Center is (50, 20); vector (10, 0) * 0.3 = 3
        assert!(m.pointer_move(60.0, 20.0));
        assert!((m.target().x - 3.0).abs() < 1e-9);

        // Vector (50, 0) * 0.3 = 15, clamped to 12
        m.pointer_move(100.0, 20.0);
        assert!((m.target().length() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_spring_converges_and_relaxes() {
        let mut m = magnetic();
        m.pointer_move(60.0, 20.0);
        run(&mut m, 120);
        assert!((m.displacement().x - 3.0).abs() < 0.05);

        m.pointer_leave();
        run(&mut m, 180);
        assert_eq!(m.displacement(), Vec2::ZERO);
        assert!(m.is_settled());
    }

    #[test]
    fn test_outside_bounds_acts_as_leave() {
        let mut m = magnetic();
        m.pointer_move(60.0, 20.0);
        assert!(!m.pointer_move(500.0, 500.0));
        assert_eq!(m.target(), Vec2::ZERO);
    }

    #[test]
    fn test_coarse_pointer_reports_zero() {
        let mut m = magnetic();
        m.set_coarse_pointer(true);
        m.pointer_move(90.0, 30.0);
        assert_eq!(m.step(Duration::from_millis(16)), Vec2::ZERO);
    }

    #[test]
    fn test_reduced_motion_reports_zero() {
        let gate = ReducedMotionGate::new(ReducedMotionMode::Always);
        let mut m = Magnetic::new(MagneticConfig::default(), gate);
        m.set_bounds(Rect::new(0.0, 0.0, 100.0, 40.0));
        m.pointer_move(90.0, 30.0);
        run(&mut m, 10);
        assert_eq!(m.displacement(), Vec2::ZERO);
    }
}
