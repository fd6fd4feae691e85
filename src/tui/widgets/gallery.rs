//! Gallery panel: one three-line card per stored palette, newest first.

use crate::app::state::{AppState, Focus};
use crate::color::to_term_color;
use crate::gallery::{GalleryCard, GalleryGrid};
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const CARD_HEIGHT: usize = 3;

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let gallery = &mut state.gallery;

    let border_color = if state.focus == Focus::Gallery {
        theme.tones.accent
    } else {
        theme.tones.border
    };
    let title = match &gallery.grid {
        GalleryGrid::Cards { total, .. } => format!(" {} Gallery ({total}) ", theme.icons.gallery),
        _ => format!(" {} Gallery ", theme.icons.gallery),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(Style::default().fg(theme.tones.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint = |text: String| Paragraph::new(Line::from(text)).style(Style::default().fg(theme.tones.fg_secondary));

    match &gallery.grid {
        GalleryGrid::NotLoaded => {
            let spinner = LoadingSpinner::frame(state.tick);
            frame.render_widget(hint(format!("{spinner} Loading gallery...")), inner);
            return;
        }
        GalleryGrid::Failed(msg) => {
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", theme.icons.error),
                    Style::default().fg(theme.tones.error),
                ),
                Span::styled(msg.as_str(), Style::default().fg(theme.tones.error)),
            ]);
            frame.render_widget(Paragraph::new(line), inner);
            return;
        }
        GalleryGrid::Cards { cards, .. } if cards.is_empty() => {
            frame.render_widget(hint("No palettes yet".to_string()), inner);
            return;
        }
        GalleryGrid::Cards { .. } => {}
    }

    let visible_cards = (inner.height as usize / CARD_HEIGHT).max(1);
    gallery.update_scroll(visible_cards);

    let width = inner.width.saturating_sub(3) as usize;
    let items: Vec<ListItem> = gallery
        .grid
        .cards()
        .iter()
        .skip(gallery.scroll_offset)
        .take(visible_cards)
        .map(|card| card_item(card, &theme, width))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(gallery.selected.saturating_sub(gallery.scroll_offset)));

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.tones.bg_highlight))
        .highlight_symbol("\u{f054} "); // nf-fa-chevron_right
    frame.render_stateful_widget(list, inner, &mut list_state);
}

fn card_item(card: &GalleryCard, theme: &Theme, width: usize) -> ListItem<'static> {
    let strip: Vec<Span> = card
        .swatches
        .iter()
        .map(|s| match s.rgba {
            Some(c) => Span::styled("    ", Style::default().bg(to_term_color(c))),
            None => Span::styled(" ?? ", Style::default().fg(theme.tones.error)),
        })
        .collect();

    let mut meta = vec![Span::styled(
        format!("{} {}", theme.icons.clock, card.timestamp),
        Style::default().fg(theme.tones.fg_secondary),
    )];
    if let Some(label) = &card.label {
        meta.push(Span::styled(
            format!("  {label}"),
            Style::default().fg(theme.tones.accent_alt),
        ));
    }

    ListItem::new(vec![
        Line::from(strip),
        Line::from(Span::styled(
            super::truncate_str(&card.quote, width),
            Style::default()
                .fg(theme.tones.fg_primary)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(meta),
    ])
}
