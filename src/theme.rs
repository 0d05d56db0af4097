//! Card palette, optionally taken from the Omarchy/Hyprland system theme
//! (~/.config/omarchy/current/theme/kitty.conf)

use ratatui::style::Color;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Focused input, primary button
    pub danger: Color,      // Field errors
    pub success: Color,     // Success notices
    pub text: Color,        // Input text and title
    pub text_dim: Color,    // Placeholders, hints
    pub inactive: Color,    // Unfocused borders, disabled button
    pub background: Color,  // Page background behind the card
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(137, 180, 250),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            background: Color::Rgb(30, 30, 46),
        }
    }
}

impl Theme {
    pub fn load() -> Self {
        Self::load_omarchy_theme().unwrap_or_default()
    }

    fn load_omarchy_theme() -> Option<Self> {
        let path = dirs::home_dir()?.join(".config/omarchy/current/theme/kitty.conf");
        let content = std::fs::read_to_string(path).ok()?;
        Self::from_kitty_conf(&content)
    }

    /// Map kitty color slots onto the palette; `None` if the file has no colors
    fn from_kitty_conf(content: &str) -> Option<Self> {
        let colors = parse_kitty_conf(content);
        if colors.is_empty() {
            return None;
        }

        let fallback = Self::default();
        let pick = |keys: &[&str], default: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k).copied())
                .unwrap_or(default)
        };

        Some(Self {
            accent: pick(&["color4", "color12"], fallback.accent),
            danger: pick(&["color1", "color9"], fallback.danger),
            success: pick(&["color2", "color10"], fallback.success),
            text: pick(&["foreground"], fallback.text),
            text_dim: pick(&["color8"], fallback.text_dim),
            inactive: pick(&["inactive_border_color", "color8"], fallback.inactive),
            background: pick(&["background"], fallback.background),
        })
    }
}

/// `key #rrggbb` lines; comments and non-color values are skipped
fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once(char::is_whitespace)?;
            Some((key.to_string(), parse_hex_color(value)?))
        })
        .collect()
}

/// `#RRGGBB` or `#RGB`
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}
