//! Light/dark themes and the text color chosen by the user.

use rollclock_engine::paint::Color;

#[inline]
fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::from_srgb_u8(r, g, b, 255)
}

/// Display theme.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn background(self) -> Color {
        match self {
            Theme::Dark => Color::BLACK,
            Theme::Light => Color::WHITE,
        }
    }

    /// Text color a freshly selected theme starts with.
    pub fn default_text(self) -> Color {
        match self {
            Theme::Dark => Color::WHITE,
            Theme::Light => Color::BLACK,
        }
    }

    /// Resting color of the non-emphasized strip cells.
    pub fn neutral(self) -> Color {
        match self {
            Theme::Dark => rgb8(0x8a, 0x8a, 0x8a),
            Theme::Light => rgb8(0x6b, 0x6b, 0x6b),
        }
    }

    /// Text color swatches offered for this theme.
    pub fn palette(self) -> [Color; 5] {
        match self {
            Theme::Dark => [
                rgb8(0xc4, 0x1e, 0x1e),
                rgb8(0x1a, 0x5f, 0x7a),
                rgb8(0x4a, 0xde, 0x80),
                rgb8(0xa8, 0x55, 0xf7),
                Color::WHITE,
            ],
            Theme::Light => [
                rgb8(0xc4, 0x1e, 0x1e),
                rgb8(0x1a, 0x5f, 0x7a),
                rgb8(0x16, 0xa3, 0x4a),
                rgb8(0x93, 0x33, 0xea),
                Color::BLACK,
            ],
        }
    }

    #[inline]
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Theme plus the current text color. Last selection wins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ThemeState {
    theme: Theme,
    text: Color,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self { theme, text: theme.default_text() }
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[inline]
    pub fn text_color(&self) -> Color {
        self.text
    }

    /// Switches theme and resets the text color to the new theme's default.
    pub fn toggle(&mut self) {
        self.theme = self.theme.toggled();
        self.text = self.theme.default_text();
        log::debug!("theme switched to {:?}", self.theme);
    }

    pub fn select_text_color(&mut self, color: Color) {
        self.text = color;
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
