//! Terminal color theme
//!
//! Maps the 16 palette indices stored in grid cells to terminal colors.
//! Auto-detects light backgrounds via COLORFGBG, or HAMLET_LIGHT_BG=1.

use ratatui::style::Color;
use strum::{Display, EnumString, VariantNames};

/// How palette indices become terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum PaletteMode {
    /// 24-bit PICO-8 colors
    #[default]
    Pico8,
    /// The terminal's own 16 ANSI colors
    Ansi,
}

impl PaletteMode {
    pub fn next(self) -> Self {
        match self {
            PaletteMode::Pico8 => PaletteMode::Ansi,
            PaletteMode::Ansi => PaletteMode::Pico8,
        }
    }
}

const PICO8: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x1D, 0x2B, 0x53),
    (0x7E, 0x25, 0x53),
    (0x00, 0x87, 0x51),
    (0xAB, 0x52, 0x36),
    (0x5F, 0x57, 0x4F),
    (0xC2, 0xC3, 0xC7),
    (0xFF, 0xF1, 0xE8),
    (0xFF, 0x00, 0x4D),
    (0xFF, 0xA3, 0x00),
    (0xFF, 0xEC, 0x27),
    (0x00, 0xE4, 0x36),
    (0x29, 0xAD, 0xFF),
    (0x83, 0x76, 0x9C),
    (0xFF, 0x77, 0xA8),
    (0xFF, 0xCC, 0xAA),
];

/// Color theme for terminal UI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (key help)
    pub text_dim: Color,
    pub border: Color,
    /// Seed and counters in the status line
    pub accent: Color,
    /// Failure messages
    pub bad: Color,
    pub palette: PaletteMode,
    light: bool,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            accent: Color::Cyan,
            bad: Color::Red,
            palette: PaletteMode::default(),
            light: false,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Blue,
            bad: Color::Red,
            palette: PaletteMode::default(),
            light: true,
        }
    }

    /// Auto-detect terminal background and return appropriate theme
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn with_palette(mut self, palette: PaletteMode) -> Self {
        self.palette = palette;
        self
    }

    /// Map a palette index (0-15) to a terminal color
    pub fn cell_color(&self, index: u8) -> Color {
        match self.palette {
            PaletteMode::Pico8 => {
                let (r, g, b) = PICO8[(index & 0x0F) as usize];
                Color::Rgb(r, g, b)
            }
            PaletteMode::Ansi => self.ansi_color(index),
        }
    }

    fn ansi_color(&self, index: u8) -> Color {
        match index {
            0 if self.light => Color::DarkGray,
            7 | 15 if self.light => Color::Black,
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Magenta,
            3 => Color::Green,
            4 => Color::Red,
            5 => Color::DarkGray,
            6 => Color::Gray,
            7 => Color::White,
            8 => Color::LightRed,
            9 => Color::Yellow,
            10 => Color::LightYellow,
            11 => Color::LightGreen,
            12 => Color::LightBlue,
            13 => Color::LightMagenta,
            14 => Color::LightRed,
            _ => Color::White,
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("HAMLET_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg"; background 7 or 15 means light
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
        {
            return matches!(bg.trim(), "7" | "15");
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_pico8_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.cell_color(0), Color::Rgb(0, 0, 0));
        assert_eq!(theme.cell_color(11), Color::Rgb(0x00, 0xE4, 0x36));
    }

    #[test]
    fn test_light_theme_avoids_white_on_white() {
        let theme = Theme::light().with_palette(PaletteMode::Ansi);
        assert_eq!(theme.cell_color(7), Color::Black);
        assert_eq!(theme.cell_color(0), Color::DarkGray);
    }

    #[test]
    fn test_palette_mode_parse() {
        assert_eq!(PaletteMode::from_str("ansi").unwrap(), PaletteMode::Ansi);
        assert_eq!(PaletteMode::from_str("pico8").unwrap(), PaletteMode::Pico8);
        assert!(PaletteMode::from_str("cga").is_err());
        assert_eq!(PaletteMode::Pico8.next(), PaletteMode::Ansi);
    }
}
