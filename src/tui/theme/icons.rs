//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    pub palette: &'static str,
    pub gallery: &'static str,
    pub pen: &'static str,
    pub help: &'static str,

    pub success: &'static str,
    pub error: &'static str,

    pub clock: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            palette: "\u{f1fc}", // nf-fa-paint_brush
            gallery: "\u{f03e}", // nf-fa-picture_o
            pen: "\u{f040}",     // nf-fa-pencil
            help: "\u{f059}",    // nf-fa-question_circle

            success: "\u{f00c}", // nf-fa-check
            error: "\u{f00d}",   // nf-fa-times

            clock: "\u{f017}", // nf-fa-clock_o
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    /// Frames advance once per redraw.
    pub fn frame(tick: u64) -> &'static str {
        Self::BRAILLE[tick as usize % Self::BRAILLE.len()]
    }
}
