pub mod config;
pub mod dom;
pub mod error;
pub mod lifecycle;
pub mod motion;
pub mod resources;
pub mod template;
pub mod ui;

pub use config::{AppConfig, ReducedMotionMode};
pub use dom::{ElementId, ElementTree, FocusHost, Key, Rect};
pub use error::{Error, Result};
pub use lifecycle::{FrameScheduler, Liveness, LivenessToken};
pub use motion::{EasingType, ReducedMotionGate};
pub use resources::SharedResources;
