//! L3 Molecular Layer: Scroll-linked transforms
//!
//! Maps scroll position inside a region to a continuous output value
//! (parallax offset, fade, progress). Scroll events only record the latest
//! offset; `update()` runs once per frame and honours the last value seen
//! before it, so bursts of events cost a single recomputation.

use tracing::trace;

use super::easing::EasingType;
use super::gate::ReducedMotionGate;
use super::timing::{lerp, map_range};
use crate::config::ScrollConfig;

/// Measured position of the linked region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGeometry {
    /// Document offset of the region's top edge
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

impl RegionGeometry {
    pub fn new(top: f64, height: f64, viewport_height: f64) -> Self {
        Self {
            top,
            height,
            viewport_height,
        }
    }

    /// Whether any part of the region is inside the viewport at `scroll_y`
    pub fn intersects(&self, scroll_y: f64) -> bool {
        scroll_y + self.viewport_height > self.top && scroll_y < self.top + self.height
    }
}

/// Which scroll offsets map to progress 0 and 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRange {
    /// From the region entering at the bottom to leaving at the top
    EnterToExit,
    /// From the region entering at the bottom to its top reaching the viewport top
    EnterToTop,
    /// Fixed scroll offsets
    Explicit { start: f64, end: f64 },
}

impl ScrollRange {
    fn resolve(&self, geometry: Option<&RegionGeometry>) -> Option<(f64, f64)> {
        match (self, geometry) {
            (ScrollRange::Explicit { start, end }, _) => Some((*start, *end)),
            (ScrollRange::EnterToExit, Some(g)) => Some((g.top - g.viewport_height, g.top + g.height)),
            (ScrollRange::EnterToTop, Some(g)) => Some((g.top - g.viewport_height, g.top)),
            (_, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLinkOptions {
    pub range: ScrollRange,
    /// Output values at progress 0 and 1
    pub output: (f64, f64),
    pub clamp: bool,
    pub easing: EasingType,
    /// Value held while motion is reduced; defaults to the output end
    pub resting: Option<f64>,
}

impl ScrollLinkOptions {
    pub fn new(output: (f64, f64)) -> Self {
        Self {
            range: ScrollRange::EnterToExit,
            output,
            clamp: true,
            easing: EasingType::Linear,
            resting: None,
        }
    }

    /// Parallax offset travelling from `+travel` to `-travel`, resting at 0
    pub fn parallax(config: &ScrollConfig) -> Self {
        Self {
            range: ScrollRange::EnterToExit,
            output: (config.parallax_travel, -config.parallax_travel),
            clamp: config.clamp,
            easing: config.easing,
            resting: Some(0.0),
        }
    }

    /// Opacity fading in while the region approaches the top
    pub fn fade_in() -> Self {
        Self {
            range: ScrollRange::EnterToTop,
            ..Self::new((0.0, 1.0))
        }
    }

    pub fn range(mut self, range: ScrollRange) -> Self {
        self.range = range;
        self
    }

    pub fn easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    fn resting_value(&self) -> f64 {
        self.resting.unwrap_or(self.output.1)
    }
}

/// One scroll-linked output value
#[derive(Debug, Clone)]
pub struct ScrollLink {
    options: ScrollLinkOptions,
    gate: ReducedMotionGate,
    geometry: Option<RegionGeometry>,
    range: Option<(f64, f64)>,
    pending: Option<f64>,
    last_scroll: Option<f64>,
    value: f64,
    was_active: bool,
    recomputations: u64,
}

impl ScrollLink {
    pub fn new(options: ScrollLinkOptions, gate: ReducedMotionGate) -> Self {
        let range = options.range.resolve(None);
        let value = options.output.0;
        Self {
            options,
            gate,
            geometry: None,
            range,
            pending: None,
            last_scroll: None,
            value,
            was_active: false,
            recomputations: 0,
        }
    }

    /// Record region geometry (mount and resize); the next frame recomputes
    pub fn measure(&mut self, geometry: RegionGeometry) {
        self.geometry = Some(geometry);
        self.range = self.options.range.resolve(self.geometry.as_ref());
        if self.pending.is_none() {
            self.pending = self.last_scroll;
        }
    }

    /// Record a scroll event; last write before the frame wins
    #[inline]
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.pending = Some(scroll_y);
    }

    /// Whether a scroll or resize is waiting for the next frame
    pub fn needs_update(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame callback: at most one recomputation, returns the current value
    pub fn update(&mut self) -> f64 {
        let Some(scroll_y) = self.pending.take() else {
            return self.current();
        };
        self.last_scroll = Some(scroll_y);

        if self.gate.is_reduced() {
            self.value = self.options.resting_value();
            return self.value;
        }

        let active = match &self.geometry {
            Some(g) => g.intersects(scroll_y),
            None => matches!(self.options.range, ScrollRange::Explicit { .. }),
        };

        if active {
            self.value = self.compute(scroll_y);
            self.was_active = true;
        } else if self.was_active {
            // Settle on the boundary value the region left through
            self.value = self.compute(scroll_y);
            self.was_active = false;
        } else {
            trace!(scroll_y, "Scroll link outside viewport, skipped");
        }
        self.value
    }

    /// Current output value
    pub fn current(&self) -> f64 {
        if self.gate.is_reduced() {
            self.options.resting_value()
        } else {
            self.value
        }
    }

    /// Progress through the range for the last processed scroll offset
    pub fn progress(&self) -> Option<f64> {
        let (start, end) = self.range?;
        let y = self.last_scroll?;
        Some(map_range(y, (start, end), (0.0, 1.0), self.options.clamp))
    }

    /// Number of recomputations performed (for frame budget checks)
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    fn compute(&mut self, scroll_y: f64) -> f64 {
        let Some((start, end)) = self.range else {
            return self.value;
        };
        self.recomputations += 1;
        let progress = map_range(scroll_y, (start, end), (0.0, 1.0), self.options.clamp);
        let eased = if (0.0..=1.0).contains(&progress) {
            self.options.easing.apply(progress)
        } else {
            // Unclamped overshoot stays linear
            progress
        };
        lerp(self.options.output.0, self.options.output.1, eased)
    }
}
