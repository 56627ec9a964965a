//! Color palette for terminal output

use owo_colors::{OwoColorize, Rgb};
use std::io::IsTerminal;

/// Fixed palette shared by every command
pub struct Palette;

impl Palette {
    pub const GRAY: Rgb = Rgb(0x80, 0x80, 0x80);
    pub const LIGHT_GRAY: Rgb = Rgb(0xc8, 0xc4, 0xa9);
    pub const ORANGE: Rgb = Rgb(0xff, 0xa8, 0x60);
    pub const BLUE: Rgb = Rgb(0x55, 0xaa, 0xff);
    pub const GREEN: Rgb = Rgb(0x55, 0xff, 0x7f);
    pub const RED: Rgb = Rgb(0xff, 0x50, 0x50);
    pub const PALE_LIME: Rgb = Rgb(0xce, 0xe8, 0x9c);
}

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Colorizes text unless color output is turned off
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    /// Theme honoring the `ui.color` setting, `NO_COLOR` and whether stdout is a terminal
    pub fn detect(color: bool) -> Self {
        let enabled =
            color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self { enabled }
    }

    /// Theme that never emits escape codes
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Whether escape codes are emitted
    pub fn enabled(self) -> bool {
        self.enabled
    }

    /// `text` in `color`
    pub fn paint(self, color: Rgb, text: &str) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}
