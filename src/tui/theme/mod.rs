//! Theme: grayscale chrome so the generated colours carry the screen.

pub mod icons;
pub mod tones;

pub use icons::{Icons, LoadingSpinner};
pub use tones::Tones;

use ratatui::symbols::border;

#[derive(Debug, Clone)]
pub struct Theme {
    pub tones: Tones,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            tones: Tones::MONO,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}
