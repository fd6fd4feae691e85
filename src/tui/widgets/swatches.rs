//! Palette panel: the five generated colours as full-height stripes.

use crate::app::state::AppState;
use crate::color::{contrast_text, to_term_color};
use crate::palette::{PalettePanel, Swatch};
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.tones.border))
        .title(format!(" {} Palette ", theme.icons.palette))
        .title_style(Style::default().fg(theme.tones.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &state.palette {
        PalettePanel::Empty => message(
            frame,
            inner,
            Line::from(Span::styled(
                "Describe how you feel and press Enter",
                Style::default().fg(theme.tones.fg_secondary),
            )),
        ),
        PalettePanel::Loading => message(
            frame,
            inner,
            Line::from(Span::styled(
                format!("{} Generating palette...", LoadingSpinner::frame(state.tick)),
                Style::default().fg(theme.tones.fg_secondary),
            )),
        ),
        PalettePanel::Error(e) => message(
            frame,
            inner,
            Line::from(vec![
                Span::styled(
                    format!("{} ", theme.icons.error),
                    Style::default().fg(theme.tones.error),
                ),
                Span::styled(e.as_str(), Style::default().fg(theme.tones.error)),
            ]),
        ),
        PalettePanel::Ready {
            swatches,
            summary,
            source_text,
        } => render_ready(frame, &theme, inner, swatches, summary.as_deref(), source_text),
    }
}

fn message(frame: &mut Frame, area: Rect, line: Line) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

fn render_ready(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    swatches: &[Swatch],
    summary: Option<&str>,
    source_text: &str,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let stripes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(swatches.iter().map(|_| Constraint::Ratio(1, swatches.len() as u32)))
        .split(rows[0]);

    for (swatch, cell) in swatches.iter().zip(stripes.iter()) {
        render_stripe(frame, theme, *cell, swatch);
    }

    let mut lines = vec![Line::default()];
    if let Some(summary) = summary {
        lines.push(Line::from(Span::styled(
            summary.to_string(),
            Style::default().fg(theme.tones.accent_alt),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("\"{source_text}\""),
        Style::default()
            .fg(theme.tones.fg_secondary)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        rows[1],
    );
}

fn render_stripe(frame: &mut Frame, theme: &Theme, area: Rect, swatch: &Swatch) {
    let (fill, label_style) = match swatch.rgba {
        Some(c) => {
            let bg = to_term_color(c);
            (
                Style::default().bg(bg),
                Style::default()
                    .bg(bg)
                    .fg(to_term_color(contrast_text(c)))
                    .add_modifier(Modifier::BOLD),
            )
        }
        None => (
            Style::default(),
            Style::default().fg(theme.tones.error),
        ),
    };
    frame.render_widget(Block::default().style(fill), area);

    if area.height == 0 {
        return;
    }
    let label_row = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let label = super::truncate_str(&swatch.value, area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, label_style))).alignment(Alignment::Center),
        label_row,
    );
}
