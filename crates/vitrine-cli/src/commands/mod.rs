pub mod config;
pub mod preview;
pub mod templates;
