use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Dark or light variant
    pub dark: bool,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Card border color
    pub border: Color,
    /// Checked cell background
    pub checked_bg: Color,
    /// Checked cell text
    pub checked_fg: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Bingo count and completed-line accents
    pub bingo: Color,
    /// Status text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            dark: true,
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 90, g: 100, b: 120 },
            checked_bg: Color::Rgb { r: 40, g: 120, b: 70 },
            checked_fg: Color::Rgb { r: 255, g: 255, b: 255 },
            cursor_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            bingo: Color::Rgb { r: 255, g: 210, b: 100 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            dark: false,
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 150, g: 150, b: 170 },
            checked_bg: Color::Rgb { r: 120, g: 200, b: 140 },
            checked_fg: Color::Rgb { r: 10, g: 40, b: 20 },
            cursor_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            bingo: Color::Rgb { r: 200, g: 120, b: 20 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// The other variant
    pub fn toggled(&self) -> Self {
        if self.dark {
            Self::light()
        } else {
            Self::dark()
        }
    }
}
