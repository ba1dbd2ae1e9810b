//! Easing curves shared by reveals, count-ups and scroll-linked motion.
//!
//! Curves map [0, 1] onto [0, 1] and are named by identifier in config.

use serde::{Deserialize, Serialize};

/// Easing curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end state on completion
    None,
    Linear,
    /// Cubic ease-out
    #[default]
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Cubic ease-in-out
    EaseInOut,
}

impl EasingType {
    /// Eased value for progress `t`; out-of-range input is clamped first
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => t.floor(),
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::EaseInOut => cubic_ease_in_out(t),
        }
    }
}

fn cubic_ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn quintic_ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// 1 - 2^(-10t), snapped to 1 at the end
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

fn cubic_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::EaseInOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            if easing != EasingType::None {
                assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in &ALL[1..] {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_input_clamped() {
        assert_eq!(EasingType::Linear.apply(-3.0), 0.0);
        assert_eq!(EasingType::Linear.apply(7.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert!((EasingType::EaseInOut.apply(0.5) - 0.5).abs() < 1e-9);
    }
}
