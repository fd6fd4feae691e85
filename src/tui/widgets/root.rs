//! Root layout widget - orchestrates main layout structure

use crate::app::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
    Frame,
};

use super::{gallery, help, prompt, status, swatches};

/// Main layout structure:
/// ┌───────────────────────────────────────────────┐
/// │ Feeling input                                 │
/// ├─────────────────────────┬─────────────────────┤
/// │ Palette                 │ Gallery (toggled)   │
/// │                         │                     │
/// ├─────────────────────────┴─────────────────────┤
/// │ status                                  toast │
/// └───────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    prompt::render(frame, state, rows[0]);

    if state.gallery.visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);
        swatches::render(frame, state, cols[0]);
        gallery::render(frame, state, cols[1]);
    } else {
        swatches::render(frame, state, rows[1]);
    }

    status::render(frame, state, rows[2]);

    if state.show_help {
        let area = centered(rows[1], 80, 90);
        frame.render_widget(Clear, area);
        help::render(frame, area);
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
