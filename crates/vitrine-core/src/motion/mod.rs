//! Motion system for Vitrine templates
//!
//! Everything that moves is expressed as state evaluated per frame, never as
//! blocking waits, and every component consults the reduced-motion gate.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves
//! - `timing` - Progress, interpolation and range mapping
//! - `gate` - Reduced-motion preference
//!
//! ## L3 Molecular Layer
//! - `reveal` - Viewport reveal controller
//! - `scroll_link` - Scroll-linked transforms
//! - `magnetic` - Pointer-following spring
//! - `count_up` - Stat counters
//!
//! # Usage
//!
//! ```ignore
//! use vitrine_core::motion::{ReducedMotionGate, RevealController, RevealOptions};
//!
//! let gate = ReducedMotionGate::default();
//! let reveals = RevealController::new(gate.clone());
//! let handle = reveals.subscribe(card, RevealOptions::from_config(&config.reveal), &probe, now);
//!
//! // Each frame
//! reveals.on_intersections(&entries, now);
//! let style = reveals.style_at(card, now);
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod gate;
pub mod timing;

// L3 Molecular Layer
pub mod count_up;
pub mod magnetic;
pub mod reveal;
pub mod scroll_link;

pub use count_up::CountUp;
pub use easing::EasingType;
pub use gate::{PreferenceSource, ReducedMotionGate, StaticPreference};
pub use magnetic::{Magnetic, Vec2};
pub use reveal::{
    AnimationDescriptor, IntersectionEntry, RevealController, RevealHandle, RevealOptions,
    StyleValues, ViewportProbe,
};
pub use scroll_link::{RegionGeometry, ScrollLink, ScrollLinkOptions, ScrollRange};
