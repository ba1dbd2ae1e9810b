use ratatui::style::Color;

/// Runtime theme with configurable accent
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub accent: Color,
    pub focus: Color,
    pub scrim: Color,
    pub warning: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            focus: Color::Rgb(0xd8, 0xa6, 0x57),
            scrim: Color::Rgb(0x1d, 0x20, 0x21),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
        }
    }
}

impl Theme {
    /// Default palette with the template's signature accent
    pub fn for_template(name: &str, accent_override: Option<&str>) -> Self {
        let accent = match name {
            "restaurant" => Color::Rgb(0xe7, 0x8a, 0x4e),
            "salon" => Color::Rgb(0xd3, 0x86, 0x9b),
            "course" => Color::Rgb(0x7d, 0xae, 0xa3),
            "agency" => Color::Rgb(0x89, 0xb4, 0x82),
            _ => Color::Rgb(0xd8, 0xa6, 0x57),
        };
        let accent = accent_override.and_then(parse_hex_color).unwrap_or(accent);
        Self {
            accent,
            ..Self::default()
        }
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Color::Rgb(0xff, 0x80, 0x00)));
        assert_eq!(parse_hex_color("fff"), Some(Color::Rgb(0xff, 0xff, 0xff)));
        assert_eq!(parse_hex_color("#zzz"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_accent_override() {
        let theme = Theme::for_template("salon", Some("#000"));
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        let fallback = Theme::for_template("salon", Some("not-a-colour"));
        assert_eq!(fallback.accent, Color::Rgb(0xd3, 0x86, 0x9b));
    }
}
