use crate::app::state::{AppState, ToastKind};
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Bottom line: status on the left, the latest toast on the right.
pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let status = if state.status.is_empty() {
        "F1 help".to_string()
    } else {
        format!("{}  F1 help", state.status)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            super::truncate_str(&format!(" {status}"), cols[0].width as usize),
            Style::default().fg(theme.tones.fg_secondary),
        ))),
        cols[0],
    );

    if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (prefix, color) = match toast.kind {
            ToastKind::Success => (theme.icons.success, theme.tones.success),
            ToastKind::Error => (theme.icons.error, theme.tones.error),
        };
        let width = cols[1].width as usize;
        let toast_line = Line::from(vec![
            Span::styled(format!("{} ", prefix), Style::default().fg(color)),
            Span::styled(
                super::truncate_str(&toast.message, width.saturating_sub(3)),
                Style::default().fg(color),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(toast_line).alignment(Alignment::Right),
            cols[1],
        );
    }
}
