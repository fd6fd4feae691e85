use crate::app::state::{AppState, Focus};
use crate::tui::theme::{get_theme, LoadingSpinner};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the feeling input box
pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let is_focused = state.focus == Focus::Input;
    let border_color = if is_focused {
        theme.tones.accent
    } else {
        theme.tones.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} How do you feel? ", theme.icons.pen))
        .title_style(Style::default().fg(theme.tones.accent))
        .title_bottom(
            Line::from(format!(" method: {} ", state.method))
                .style(Style::default().fg(theme.tones.fg_secondary))
                .right_aligned(),
        );

    // Keep the end of long input in view.
    let room = area.width.saturating_sub(4) as usize;
    let count = state.input.chars().count();
    let visible: String = state.input.chars().skip(count.saturating_sub(room)).collect();

    let tail = if state.palette.is_loading() {
        format!(" {}", LoadingSpinner::frame(state.tick))
    } else if is_focused {
        "▏".to_string()
    } else {
        String::new()
    };

    let line = if state.input.is_empty() && !is_focused {
        Line::from(Span::styled(
            "Press i to write",
            Style::default().fg(theme.tones.fg_secondary),
        ))
    } else {
        Line::from(vec![
            Span::styled(visible, Style::default().fg(theme.tones.fg_primary)),
            Span::styled(tail, Style::default().fg(theme.tones.accent_alt)),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
