use ratatui::style::Color;

use crate::preferences::Theme;

/// Colors derived from the theme preference
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub panel: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::Rgb(246, 246, 242),
                fg: Color::Rgb(32, 32, 40),
                muted: Color::Rgb(110, 110, 122),
                accent: Color::Rgb(20, 110, 180),
                panel: Color::Rgb(225, 228, 235),
                error: Color::Rgb(190, 40, 40),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(24, 24, 32),
                fg: Color::Rgb(228, 228, 235),
                muted: Color::Rgb(140, 140, 155),
                accent: Color::Cyan,
                panel: Color::Rgb(50, 50, 60),
                error: Color::Rgb(200, 100, 100),
            },
        }
    }
}
