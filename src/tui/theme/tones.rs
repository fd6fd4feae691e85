use ratatui::style::Color;

/// Interface colours. Palette swatches never use these.
#[derive(Debug, Clone, Copy)]
pub struct Tones {
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
}

impl Tones {
    pub const MONO: Self = Self {
        bg_highlight: Color::Rgb(48, 48, 48),
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(136, 136, 136),
        accent: Color::Rgb(255, 255, 255),
        accent_alt: Color::Rgb(200, 200, 200),
        border: Color::Rgb(64, 64, 64),
        success: Color::Rgb(170, 220, 170),
        error: Color::Rgb(240, 140, 140),
    };
}

impl Default for Tones {
    fn default() -> Self {
        Self::MONO
    }
}
