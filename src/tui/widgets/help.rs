//! Help overlay showing keybindings

use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.tones.accent))
        .title(format!(" {} Keybinds ", icons.help))
        .title_style(Style::default().fg(theme.tones.accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header("Writing", &theme),
        keybind("Enter", "Generate palette", &theme),
        keybind("Backspace", "Delete character", &theme),
        keybind("Ctrl+u", "Clear input", &theme),
        keybind("F2 / Ctrl+t", "Next analysis method", &theme),
        keybind("Ctrl+g", "Show / hide gallery", &theme),
        keybind("Ctrl+e", "Export palette to PNG", &theme),
        keybind("Ctrl+s", "Service stats", &theme),
        keybind("F5", "Refresh gallery", &theme),
        keybind("Tab", "Focus gallery", &theme),
        keybind("Esc", "Quit", &theme),
    ];
    frame.render_widget(
        Paragraph::new(left_content).wrap(Wrap { trim: false }),
        cols[0],
    );

    let right_content = vec![
        section_header("Gallery", &theme),
        keybind("j / Down", "Move down", &theme),
        keybind("k / Up", "Move up", &theme),
        keybind("g / G", "Top / bottom", &theme),
        keybind("d / x / Del", "Delete palette", &theme),
        keybind("r / F5", "Refresh", &theme),
        keybind("o", "Hide gallery", &theme),
        keybind("e / s / m", "Export / stats / method", &theme),
        keybind("i / Esc", "Back to input", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("q", "Quit (gallery focus)", &theme),
        keybind("Ctrl+c", "Quit", &theme),
        keybind("F1 / ?", "Close this help", &theme),
    ];
    frame.render_widget(
        Paragraph::new(right_content).wrap(Wrap { trim: false }),
        cols[1],
    );
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.tones.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:14}", key),
            Style::default()
                .fg(theme.tones.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.tones.fg_primary)),
    ])
}
