//! Client-held UI state machines
//!
//! # Architecture
//!
//! ## L3 Molecular Layer
//! - `overlay` - Focus-trapped overlay lifecycle
//! - `disclosure` - Accordion groups
//! - `filter` - Category filter with reveal binding
//! - `stepper` - Multi-step form progress
//!
//! ## L2 Organism Layer
//! - `carousel` - Lightbox carousel on top of the overlay

// L3 Molecular Layer
pub mod disclosure;
pub mod filter;
pub mod overlay;
pub mod stepper;

// L2 Organism Layer
pub mod carousel;

pub use carousel::Carousel;
pub use disclosure::{DisclosureGroup, DisclosureMode};
pub use filter::{Categorized, FilterView, FilterableCollection, ALL};
pub use overlay::{FocusTrapOverlay, OpenOutcome, OverlayAria, OverlayPhase};
pub use stepper::Stepper;
