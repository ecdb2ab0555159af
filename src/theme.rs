//! Terminal chrome colours
//!
//! Picks up the Omarchy system theme from
//! ~/.config/omarchy/current/theme/kitty.conf when present. Circle fill
//! colours come from the config, not from here.

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,    // Borders and the title
    pub text: Color,
    pub text_dim: Color,  // Key hints, counters
    pub inactive: Color,  // Border while paused
    pub paused: Color,    // Paused badge
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            paused: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    pub fn load() -> Self {
        Self::load_omarchy_theme().unwrap_or_default()
    }

    fn load_omarchy_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        let theme_path = home.join(".config/omarchy/current/theme/kitty.conf");

        let content = fs::read_to_string(&theme_path).ok()?;
        Self::from_kitty_conf(&content)
    }

    fn from_kitty_conf(content: &str) -> Option<Self> {
        let colors = parse_kitty_conf(content);
        if colors.is_empty() {
            return None;
        }

        let fallback = Self::default();
        let pick = |keys: &[&str], default: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(default)
        };

        Some(Self {
            accent: pick(&["color2", "color10"], fallback.accent),
            text: pick(&["foreground"], fallback.text),
            text_dim: pick(&["color8"], fallback.text_dim),
            inactive: pick(&["inactive_border_color", "color8"], fallback.inactive),
            paused: pick(&["color1", "color9"], fallback.paused),
        })
    }
}

/// Parse kitty.conf format: `key value` or `key #hexcolor`
fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
    let mut colors = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(char::is_whitespace) {
            if let Some(color) = parse_hex_color(value) {
                colors.insert(key.trim().to_string(), color);
            }
        }
    }

    colors
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().strip_prefix('#')?;
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}
