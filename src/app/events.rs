use crate::api::{Analysis, GalleryListing, PaletteId, Stats};

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Network(NetworkEvent),
    /// Animation clock; only redraws while something is moving.
    Tick,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    PaletteGenerated { text: String, analysis: Analysis },
    PaletteFailed { error: String },
    /// `seq` is the refresh this listing answers.
    GalleryLoaded { seq: u64, listing: GalleryListing },
    GalleryFailed { seq: u64, error: String },
    PaletteDeleted { id: PaletteId },
    DeleteFailed { id: PaletteId, error: String },
    StatsLoaded { stats: Stats },
    Error(String),
}
