use crate::api::{AnalysisMethod, Stats};
use crate::gallery::{GalleryCard, GalleryGrid, RefreshSequence};
use crate::palette::PalettePanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Gallery,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(4)
    }
}

/// Gallery side panel. The grid is only ever replaced, never edited.
#[derive(Debug, Clone, Default)]
pub struct GalleryPanel {
    pub visible: bool,
    pub grid: GalleryGrid,
    pub selected: usize,
    pub scroll_offset: usize,
    pub sequence: RefreshSequence,
}

impl GalleryPanel {
    pub fn is_loading(&self) -> bool {
        self.sequence.in_flight()
    }

    pub fn selected_card(&self) -> Option<&GalleryCard> {
        self.grid.cards().get(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let len = self.grid.cards().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_last(&mut self) {
        self.selected = self.grid.cards().len().saturating_sub(1);
    }

    /// Replaces the grid and keeps the selection in bounds.
    pub fn replace_grid(&mut self, grid: GalleryGrid) {
        self.grid = grid;
        let len = self.grid.cards().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }

    pub fn update_scroll(&mut self, visible_cards: usize) {
        if visible_cards == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_cards {
            self.scroll_offset = self.selected + 1 - visible_cards;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,
    pub focus: Focus,
    pub show_help: bool,

    pub input: String,
    pub method: AnalysisMethod,

    pub palette: PalettePanel,
    pub gallery: GalleryPanel,
    pub stats: Option<Stats>,

    pub toast: Option<Toast>,
    pub status: String,
}

impl AppState {
    pub fn new(method: AnalysisMethod) -> Self {
        Self {
            should_quit: false,
            tick: 0,
            focus: Focus::Input,
            show_help: false,
            input: String::new(),
            method,
            palette: PalettePanel::Empty,
            gallery: GalleryPanel::default(),
            stats: None,
            toast: None,
            status: String::new(),
        }
    }

    /// A spinner is turning or a toast is waiting to expire.
    pub fn is_animating(&self) -> bool {
        self.palette.is_loading() || self.gallery.is_loading() || self.toast.is_some()
    }
}
