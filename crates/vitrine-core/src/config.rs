use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::motion::EasingType;
use crate::ui::DisclosureMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub magnetic: MagneticConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Template shown by `vitrine preview` without --template
    #[serde(default = "default_template")]
    pub default_template: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_template: default_template(),
        }
    }
}

/// How the platform reduced-motion preference is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducedMotionMode {
    /// Follow the platform preference
    #[default]
    Auto,
    /// Always treat motion as reduced
    Always,
    /// Ignore the platform preference
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// "auto", "always" or "never"
    #[serde(default)]
    pub reduced_motion: ReducedMotionMode,
    /// Treat the pointer as coarse (touch); disables magnetic effects
    #[serde(default)]
    pub coarse_pointer: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: ReducedMotionMode::Auto,
            coarse_pointer: false,
        }
    }
}

/// Defaults for viewport reveal animations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible (0.0-1.0)
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Transition duration in milliseconds
    #[serde(default = "default_reveal_duration")]
    pub duration_ms: u64,
    /// Delay added between siblings of a staggered group
    #[serde(default = "default_reveal_stagger")]
    pub stagger_ms: u64,
    #[serde(default = "default_reveal_easing")]
    pub easing: EasingType,
    /// Initial vertical offset in pixels (final is 0)
    #[serde(default = "default_reveal_offset")]
    pub offset_y: f64,
    #[serde(default)]
    pub repeatable: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            duration_ms: default_reveal_duration(),
            stagger_ms: default_reveal_stagger(),
            easing: default_reveal_easing(),
            offset_y: default_reveal_offset(),
            repeatable: false,
        }
    }
}

/// Defaults for scroll-linked transforms (parallax, fades)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Parallax travel in pixels; output range is [-travel, travel]
    #[serde(default = "default_parallax_travel")]
    pub parallax_travel: f64,
    #[serde(default = "default_scroll_easing")]
    pub easing: EasingType,
    #[serde(default = "default_true")]
    pub clamp: bool,
    /// Rows scrolled per key press in the preview
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            parallax_travel: default_parallax_travel(),
            easing: default_scroll_easing(),
            clamp: true,
            scroll_lines: default_scroll_lines(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagneticConfig {
    /// Fraction of the center-to-pointer vector applied as displacement
    #[serde(default = "default_magnetic_strength")]
    pub strength: f64,
    /// Bounding radius of the displacement
    #[serde(default = "default_magnetic_max")]
    pub max_displacement: f64,
    #[serde(default = "default_magnetic_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_magnetic_damping")]
    pub damping: f64,
    #[serde(default = "default_magnetic_mass")]
    pub mass: f64,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: default_magnetic_strength(),
            max_displacement: default_magnetic_max(),
            stiffness: default_magnetic_stiffness(),
            damping: default_magnetic_damping(),
            mass: default_magnetic_mass(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Close when Escape is pressed
    #[serde(default = "default_true")]
    pub close_on_escape: bool,
    /// Close when the scrim (backdrop) is clicked
    #[serde(default = "default_true")]
    pub close_on_scrim: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_scrim: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while anything is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Accent colour override as "#RRGGBB" or "#RGB"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Whether FAQ panels close each other
    #[serde(default)]
    pub faq_mode: DisclosureMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            accent: None,
            faq_mode: DisclosureMode::Single,
        }
    }
}

/// Preview keymap using Vim-style notation
/// Format: "j", "<C-d>" (Ctrl+d), "<S-Tab>" (Shift+Tab), "<CR>", "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    /// Move focus to the next control on the page
    #[serde(default = "default_key_focus_next")]
    pub focus_next: String,
    #[serde(default = "default_key_focus_prev")]
    pub focus_prev: String,
    /// Activate the focused control (click)
    #[serde(default = "default_key_activate")]
    pub activate: String,
    /// Open the navigation drawer
    #[serde(default = "default_key_open_menu")]
    pub open_menu: String,
    #[serde(default = "default_key_next_filter")]
    pub next_filter: String,
    #[serde(default = "default_key_prev_filter")]
    pub prev_filter: String,
    /// Flip the reduced-motion preference at runtime
    #[serde(default = "default_key_toggle_motion")]
    pub toggle_motion: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            page_down: default_key_page_down(),
            page_up: default_key_page_up(),
            focus_next: default_key_focus_next(),
            focus_prev: default_key_focus_prev(),
            activate: default_key_activate(),
            open_menu: default_key_open_menu(),
            next_filter: default_key_next_filter(),
            prev_filter: default_key_prev_filter(),
            toggle_motion: default_key_toggle_motion(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_page_down() -> String { "<C-d>".to_string() }
fn default_key_page_up() -> String { "<C-u>".to_string() }
fn default_key_focus_next() -> String { "<Tab>".to_string() }
fn default_key_focus_prev() -> String { "<S-Tab>".to_string() }
fn default_key_activate() -> String { "<CR>".to_string() }
fn default_key_open_menu() -> String { "m".to_string() }
fn default_key_next_filter() -> String { "]".to_string() }
fn default_key_prev_filter() -> String { "[".to_string() }
fn default_key_toggle_motion() -> String { "r".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_template() -> String {
    "restaurant".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reveal_threshold() -> f64 {
    0.15
}

fn default_reveal_duration() -> u64 {
    600
}

fn default_reveal_stagger() -> u64 {
    80
}

fn default_reveal_easing() -> EasingType {
    EasingType::Cubic
}

fn default_reveal_offset() -> f64 {
    24.0
}

fn default_parallax_travel() -> f64 {
    60.0
}

fn default_scroll_easing() -> EasingType {
    EasingType::Linear
}

fn default_scroll_lines() -> u16 {
    2
}

fn default_magnetic_strength() -> f64 {
    0.3
}

fn default_magnetic_max() -> f64 {
    12.0
}

fn default_magnetic_stiffness() -> f64 {
    170.0
}

fn default_magnetic_damping() -> f64 {
    26.0
}

fn default_magnetic_mass() -> f64 {
    1.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaulting when it is absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vitrine/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vitrine")
            .join("config.toml")
    }

    fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(crate::Error::Config(format!(
                "reveal.threshold must be within 0.0-1.0, got {}",
                self.reveal.threshold
            )));
        }
        if self.magnetic.mass <= 0.0 {
            return Err(crate::Error::Config("magnetic.mass must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!((config.reveal.threshold - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.reveal.duration_ms, 600);
        assert_eq!(config.reveal.easing, EasingType::Cubic);
        assert_eq!(config.motion.reduced_motion, ReducedMotionMode::Auto);
        assert!(config.overlay.close_on_escape);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [motion]
            reduced_motion = "always"

            [reveal]
            duration_ms = 250
            easing = "ease_in_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.motion.reduced_motion, ReducedMotionMode::Always);
        assert_eq!(config.reveal.duration_ms, 250);
        assert_eq!(config.reveal.easing, EasingType::EaseInOut);
        assert!((config.reveal.offset_y - 24.0).abs() < f64::EPSILON);
        assert_eq!(config.general.default_template, "restaurant");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let result = AppConfig::from_toml("[reveal]\nthreshold = 1.5\n");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_roundtrip_serializes() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.keymap.open_menu, config.keymap.open_menu);
    }

    #[test]
    fn test_missing_file_defaults() {
        let path = std::env::temp_dir().join("vitrine-config-that-does-not-exist.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ui.animation_fps, 60);
    }
}
