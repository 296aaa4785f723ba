//! Built-in color themes.
//!
//! A theme is a named palette of three colors: the window background, the
//! button color and the text color. Themes only restyle chrome; they never
//! reach the timer itself.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Window background
    pub primary: Color,
    /// Buttons and menu highlight
    pub secondary: Color,
    pub text: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Forest,
    Dark,
    Light,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Forest, ThemeName::Dark, ThemeName::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Forest => "Forest",
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeName::Forest => FOREST,
            ThemeName::Dark => DARK,
            ThemeName::Light => LIGHT,
        }
    }
}

// #214E34 / #30734C / white
const FOREST: Palette = Palette {
    primary: Color::Rgb(0x21, 0x4E, 0x34),
    secondary: Color::Rgb(0x30, 0x73, 0x4C),
    text: Color::Rgb(0xFF, 0xFF, 0xFF),
};

const DARK: Palette = Palette {
    primary: Color::Rgb(0x1E, 0x1E, 0x1E),
    secondary: Color::Rgb(0x3A, 0x3A, 0x3A),
    text: Color::Rgb(0xE0, 0xE0, 0xE0),
};

const LIGHT: Palette = Palette {
    primary: Color::Rgb(0xF4, 0xF4, 0xF4),
    secondary: Color::Rgb(0xD0, 0xD0, 0xD0),
    text: Color::Rgb(0x1A, 0x1A, 0x1A),
};
