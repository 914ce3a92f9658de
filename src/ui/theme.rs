use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    /// Spotify's dark palette.
    fn default() -> Self {
        Self {
            base: Color::Rgb(18, 18, 18),
            surface: Color::Rgb(40, 40, 40),
            overlay: Color::Rgb(179, 179, 179),
            text: Color::Rgb(255, 255, 255),
            red: Color::Rgb(233, 20, 41),
            green: Color::Rgb(29, 185, 84),
            yellow: Color::Rgb(255, 193, 7),
            blue: Color::Rgb(80, 155, 245),
            magenta: Color::Rgb(175, 40, 150),
            cyan: Color::Rgb(39, 133, 106),
        }
    }
}
