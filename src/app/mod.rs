pub mod actions;
pub mod events;
pub mod state;

use crate::api::{PaletteApi, PaletteClient};
use crate::config::Config;
use crate::export;
use crate::gallery::GalleryGrid;
use crate::input;
use crate::palette::PalettePanel;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent};
use state::{AppState, Focus, Toast};
use std::sync::Arc;
use tokio::sync::mpsc;

const SPINNER_PERIOD: std::time::Duration = std::time::Duration::from_millis(120);

pub struct App {
    cfg: Config,
    state: AppState,
    api: Arc<dyn PaletteApi>,
}

impl App {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let client = PaletteClient::new(&cfg.api.base_url, cfg.api.timeout())?;
        Ok(Self::with_api(cfg, Arc::new(client)))
    }

    pub fn with_api(cfg: Config, api: Arc<dyn PaletteApi>) -> Self {
        let state = AppState::new(cfg.analysis.method);
        Self { cfg, state, api }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        input::spawn_ticker(tx.clone(), SPINNER_PERIOD);

        self.state.status = format!("Connected to {}", self.cfg.api.base_url);
        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx);
                    }
                }
                Event::Network(ne) => self.handle_network(ne, &tx),
                Event::Tick if !self.state.is_animating() => continue,
                Event::Tick => {}
            }

            if self.state.should_quit {
                break;
            }

            self.state.tick = self.state.tick.wrapping_add(1);
            tui::draw(terminal, &mut self.state)?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Generate => self.spawn_generate(tx),
            Action::ToggleGallery => {
                self.reduce(Action::ToggleGallery);
                if self.state.gallery.visible {
                    self.spawn_load_gallery(tx);
                }
            }
            Action::RefreshGallery => {
                if !self.state.gallery.visible {
                    self.reduce(Action::ToggleGallery);
                }
                self.spawn_load_gallery(tx);
            }
            Action::DeleteSelected => self.spawn_delete(tx),
            Action::Export => self.export(),
            Action::LoadStats => self.spawn_load_stats(tx),
            other => self.reduce(other),
        }
    }

    fn spawn_generate(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.palette.is_loading() {
            self.state.status = "Still generating...".into();
            return;
        }
        let text = self.state.input.trim().to_string();
        if text.is_empty() {
            self.state.status = "Write something first".into();
            self.state.toast = Some(Toast::error("Write something first"));
            return;
        }
        let method = self.state.method;
        self.state.palette = PalettePanel::Loading;
        self.state.status = format!("Generating palette ({method})...");
        tracing::info!(%method, chars = text.chars().count(), "generate palette");

        let api = self.api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match api.analyze(&text, method).await {
                Ok(analysis) => NetworkEvent::PaletteGenerated { text, analysis },
                Err(e) => NetworkEvent::PaletteFailed {
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_load_gallery(&mut self, tx: &mpsc::Sender<Event>) {
        let seq = self.state.gallery.sequence.issue();
        let limit = self.cfg.gallery.limit;
        tracing::debug!(seq, ?limit, "refresh gallery");

        let api = self.api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match api.gallery(limit).await {
                Ok(listing) => NetworkEvent::GalleryLoaded { seq, listing },
                Err(e) => NetworkEvent::GalleryFailed {
                    seq,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_delete(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.focus != Focus::Gallery {
            return;
        }
        let Some(card) = self.state.gallery.selected_card() else {
            self.state.status = "Nothing selected".into();
            return;
        };
        let id = card.id.clone();
        self.state.status = format!("Deleting palette {id}...");
        tracing::info!(%id, "delete palette");

        let api = self.api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match api.delete_palette(&id).await {
                Ok(()) => NetworkEvent::PaletteDeleted { id },
                Err(e) => NetworkEvent::DeleteFailed {
                    id,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_load_stats(&mut self, tx: &mpsc::Sender<Event>) {
        self.state.status = "Loading stats...".into();
        let api = self.api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match api.stats().await {
                Ok(stats) => NetworkEvent::StatsLoaded { stats },
                Err(e) => NetworkEvent::Error(format!("stats: {e:#}")),
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn export(&mut self) {
        match export::export_png(self.state.palette.swatches(), &self.cfg.export.dir) {
            Ok(path) => {
                self.state.status = format!("Exported {}", path.display());
                self.state.toast = Some(Toast::success("Palette exported"));
            }
            Err(e) => {
                tracing::warn!("export failed: {e:#}");
                self.state.status = format!("Export failed: {e:#}");
                self.state.toast = Some(Toast::error("Export failed"));
            }
        }
    }

    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Resize => {}
            Action::InputChar(c) => self.state.input.push(c),
            Action::Backspace => {
                self.state.input.pop();
            }
            Action::ClearInput => self.state.input.clear(),
            Action::CycleMethod => {
                self.state.method = self.state.method.next();
                self.state.status = format!("Method: {}", self.state.method);
            }
            Action::ToggleGallery => {
                let gallery = &mut self.state.gallery;
                gallery.visible = !gallery.visible;
                if gallery.visible {
                    gallery.replace_grid(GalleryGrid::NotLoaded);
                } else if self.state.focus == Focus::Gallery {
                    self.state.focus = Focus::Input;
                }
            }
            Action::FocusNext => {
                self.state.focus = match self.state.focus {
                    Focus::Input if self.state.gallery.visible => Focus::Gallery,
                    _ => Focus::Input,
                };
            }
            Action::FocusInput => self.state.focus = Focus::Input,
            Action::ListUp => self.state.gallery.select_prev(),
            Action::ListDown => self.state.gallery.select_next(),
            Action::GoTop => self.state.gallery.selected = 0,
            Action::GoBottom => self.state.gallery.select_last(),
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            // Side-effecting actions are handled in handle_action.
            Action::Generate
            | Action::RefreshGallery
            | Action::DeleteSelected
            | Action::Export
            | Action::LoadStats => {}
        }
    }

    fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::PaletteGenerated { text, analysis } => {
                self.state.palette = PalettePanel::from_analysis(&text, &analysis);
                self.state.status = match &self.state.palette {
                    PalettePanel::Error(e) => e.clone(),
                    _ => "Palette ready".into(),
                };
                // The service stored the palette, even one we refuse to show.
                self.spawn_load_gallery(tx);
            }
            NetworkEvent::PaletteFailed { error } => {
                tracing::warn!("analyze failed: {error}");
                self.state.palette = PalettePanel::Error(format!("Could not generate palette: {error}"));
                self.state.status = "Generation failed".into();
                self.state.toast = Some(Toast::error("Could not generate palette"));
            }
            NetworkEvent::GalleryLoaded { seq, listing } => {
                if !self.state.gallery.sequence.accept(seq) {
                    tracing::debug!(seq, "dropping stale gallery response");
                    return;
                }
                self.state.gallery.replace_grid(GalleryGrid::rebuild(&listing));
                self.state.status = format!("Gallery: {} palettes", listing.total);
            }
            NetworkEvent::GalleryFailed { seq, error } => {
                if !self.state.gallery.sequence.accept(seq) {
                    tracing::debug!(seq, "dropping stale gallery failure");
                    return;
                }
                tracing::warn!("gallery failed: {error}");
                self.state.gallery.replace_grid(GalleryGrid::failed());
                self.state.status = GalleryGrid::LOAD_ERROR.into();
            }
            NetworkEvent::PaletteDeleted { id } => {
                self.state.status = format!("Deleted palette {id}");
                self.state.toast = Some(Toast::success("Palette deleted"));
                self.spawn_load_gallery(tx);
            }
            NetworkEvent::DeleteFailed { id, error } => {
                tracing::warn!(%id, "delete failed: {error}");
                self.state.status = format!("Delete failed: {error}");
                self.state.toast = Some(Toast::error("Could not delete palette"));
                self.spawn_load_gallery(tx);
            }
            NetworkEvent::StatsLoaded { stats } => {
                self.state.status = format!("Stats: {} palettes stored", stats.total_palettes);
                self.state.stats = Some(stats);
            }
            NetworkEvent::Error(e) => {
                self.state.toast = Some(Toast::error(e.clone()));
                self.state.status = format!("Error: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::GalleryListing;
    use std::time::Duration;

    struct Harness {
        app: App,
        api: Arc<FakeApi>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
    }

    impl Harness {
        fn new(api: FakeApi) -> Self {
            let api = Arc::new(api);
            let mut cfg = Config::default();
            cfg.export.dir = std::env::temp_dir();
            let app = App::with_api(cfg, api.clone());
            let (tx, rx) = mpsc::channel(64);
            Self { app, api, tx, rx }
        }

        fn act(&mut self, action: Action) {
            self.app.handle_action(action, &self.tx);
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.act(Action::InputChar(c));
            }
        }

        /// Applies network events until the channel stays quiet.
        async fn settle(&mut self) {
            while let Ok(Some(ev)) =
                tokio::time::timeout(Duration::from_millis(200), self.rx.recv()).await
            {
                if let Event::Network(ne) = ev {
                    self.app.handle_network(ne, &self.tx);
                }
            }
        }

        fn card_ids(&self) -> Vec<String> {
            self.app
                .state
                .gallery
                .grid
                .cards()
                .iter()
                .map(|c| c.id.to_string())
                .collect()
        }
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_request() {
        let mut h = Harness::new(FakeApi::new());
        h.type_text("   ");
        h.act(Action::Generate);
        h.settle().await;
        assert!(h.api.calls().is_empty());
        assert_eq!(h.app.state.status, "Write something first");
        assert_eq!(h.app.state.palette, PalettePanel::Empty);
    }

    #[tokio::test]
    async fn test_generate_renders_and_refreshes_once() {
        let mut h = Harness::new(FakeApi::new().with_entries(&[1]));
        h.type_text("  hoy estoy feliz ");
        h.act(Action::Generate);
        assert!(h.app.state.palette.is_loading());
        h.settle().await;

        assert_eq!(
            h.api.calls(),
            vec!["analyze hybrid hoy estoy feliz", "gallery Some(50)"]
        );
        let values: Vec<_> = h
            .app
            .state
            .palette
            .swatches()
            .iter()
            .map(|s| s.value.clone())
            .collect();
        assert_eq!(values, ["#111111", "#222222", "#333333", "#444444", "#555555"]);
        assert_eq!(h.card_ids(), ["2", "1"]);
    }

    #[tokio::test]
    async fn test_generate_uses_selected_method() {
        let mut h = Harness::new(FakeApi::new());
        h.act(Action::CycleMethod);
        h.type_text("x");
        h.act(Action::Generate);
        h.settle().await;
        assert_eq!(h.api.calls()[0], "analyze enhanced x");
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_gallery() {
        let mut fake = FakeApi::new().with_entries(&[4, 3]);
        fake.fail_analyze = true;
        let mut h = Harness::new(fake);
        h.act(Action::ToggleGallery);
        h.settle().await;
        let before = h.app.state.gallery.grid.clone();

        h.type_text("algo");
        h.act(Action::Generate);
        h.settle().await;

        assert!(matches!(h.app.state.palette, PalettePanel::Error(_)));
        assert_eq!(h.app.state.gallery.grid, before);
        assert_eq!(h.api.count("gallery"), 1);
    }

    #[tokio::test]
    async fn test_wrong_color_count_still_refreshes() {
        let mut fake = FakeApi::new();
        fake.colors.truncate(4);
        let mut h = Harness::new(fake);
        h.type_text("x");
        h.act(Action::Generate);
        h.settle().await;
        assert_eq!(
            h.app.state.palette,
            PalettePanel::Error("Expected 5 colours, got 4".into())
        );
        assert_eq!(h.api.count("gallery"), 1);
    }

    #[tokio::test]
    async fn test_every_open_fetches_and_close_does_not() {
        let mut h = Harness::new(FakeApi::new().with_entries(&[1]));
        h.act(Action::ToggleGallery);
        assert_eq!(h.app.state.gallery.grid, GalleryGrid::NotLoaded);
        h.settle().await;
        assert_eq!(h.card_ids(), ["1"]);

        h.act(Action::ToggleGallery);
        h.settle().await;
        assert!(!h.app.state.gallery.visible);

        h.act(Action::ToggleGallery);
        assert_eq!(h.app.state.gallery.grid, GalleryGrid::NotLoaded);
        h.settle().await;
        assert_eq!(h.api.count("gallery"), 2);
    }

    #[tokio::test]
    async fn test_gallery_failure_shows_only_error() {
        let mut fake = FakeApi::new().with_entries(&[1, 2]);
        fake.fail_gallery = true;
        let mut h = Harness::new(fake);
        h.act(Action::ToggleGallery);
        h.settle().await;
        assert_eq!(h.app.state.gallery.grid, GalleryGrid::failed());
        assert!(h.app.state.gallery.grid.cards().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reloads_without_local_removal() {
        let mut h = Harness::new(FakeApi::new().with_entries(&[3, 2, 1]));
        h.act(Action::ToggleGallery);
        h.settle().await;
        h.act(Action::FocusNext);
        h.act(Action::ListDown);
        h.act(Action::DeleteSelected);
        assert_eq!(h.card_ids(), ["3", "2", "1"]);
        h.settle().await;

        assert_eq!(h.api.calls()[1], "delete 2");
        assert_eq!(h.card_ids(), ["3", "1"]);
        assert_eq!(h.api.count("gallery"), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_still_reloads() {
        let mut h = Harness::new(FakeApi::new().with_entries(&[5, 4]));
        h.act(Action::ToggleGallery);
        h.settle().await;
        // Removed server-side after the grid was rendered.
        h.api.entries.lock().unwrap().retain(|e| e.id.as_str() != "5");

        h.act(Action::FocusNext);
        h.act(Action::DeleteSelected);
        h.settle().await;

        assert_eq!(h.api.calls()[1], "delete 5");
        assert_eq!(h.card_ids(), ["4"]);
        assert_eq!(h.app.state.toast.as_ref().map(|t| t.kind), Some(state::ToastKind::Error));
    }

    #[tokio::test]
    async fn test_delete_needs_gallery_focus() {
        let mut h = Harness::new(FakeApi::new().with_entries(&[1]));
        h.act(Action::ToggleGallery);
        h.settle().await;
        h.act(Action::DeleteSelected);
        h.settle().await;
        assert_eq!(h.api.count("delete"), 0);
    }

    #[tokio::test]
    async fn test_stale_gallery_response_dropped() {
        let mut h = Harness::new(FakeApi::new());
        let older = h.app.state.gallery.sequence.issue();
        let newer = h.app.state.gallery.sequence.issue();
        let listing = |ids: &[u64]| GalleryListing {
            total: ids.len(),
            entries: ids.iter().map(|id| crate::api::fake::entry(*id, "#000")).collect(),
        };

        h.app.handle_network(
            NetworkEvent::GalleryLoaded {
                seq: newer,
                listing: listing(&[7, 6]),
            },
            &h.tx,
        );
        h.app.handle_network(
            NetworkEvent::GalleryFailed {
                seq: older,
                error: "late".into(),
            },
            &h.tx,
        );
        assert_eq!(h.card_ids(), ["7", "6"]);
        assert!(!h.app.state.gallery.is_loading());
    }

    #[tokio::test]
    async fn test_closing_gallery_returns_focus() {
        let mut h = Harness::new(FakeApi::new());
        h.act(Action::FocusNext);
        assert_eq!(h.app.state.focus, Focus::Input);
        h.act(Action::ToggleGallery);
        h.act(Action::FocusNext);
        assert_eq!(h.app.state.focus, Focus::Gallery);
        h.act(Action::ToggleGallery);
        assert_eq!(h.app.state.focus, Focus::Input);
        h.settle().await;
    }

    #[tokio::test]
    async fn test_export_writes_into_configured_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut h = Harness::new(FakeApi::new());
        h.app.cfg.export.dir = dir.path().to_path_buf();
        h.type_text("x");
        h.act(Action::Generate);
        h.settle().await;
        h.act(Action::Export);
        assert!(dir.path().join(export::EXPORT_FILE_NAME).is_file());
        assert_eq!(h.app.state.toast.as_ref().map(|t| t.kind), Some(state::ToastKind::Success));
    }

    #[tokio::test]
    async fn test_stats_loaded() {
        let mut h = Harness::new(FakeApi::new().with_entries(&[1, 2, 3]));
        h.act(Action::LoadStats);
        h.settle().await;
        assert_eq!(h.app.state.stats.as_ref().map(|s| s.total_palettes), Some(3));
        assert_eq!(h.app.state.status, "Stats: 3 palettes stored");
    }
}
