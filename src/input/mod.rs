use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Focus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if !event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let ev = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("terminal read failed: {e}");
                    continue;
                }
            };
            if tx.blocking_send(Event::Input(ev)).is_err() {
                break;
            }
        }
    });
}

/// Feeds `Event::Tick` until the receiver goes away.
pub fn spawn_ticker(tx: mpsc::Sender<Event>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) if state.gallery.visible => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ListUp),
            MouseEventKind::ScrollDown => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Mouse(_) => None,
        InputEvent::Key(k) => {
            if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
                return Some(Action::Quit);
            }
            if state.show_help {
                return handle_help(k);
            }
            match state.focus {
                Focus::Input => handle_input_focus(k),
                Focus::Gallery => handle_gallery_focus(k),
            }
        }
    }
}

fn handle_help(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
            Some(Action::ToggleHelp)
        }
        _ => None,
    }
}

/// Typing goes into the text box, so commands here need a modifier or a
/// function key.
fn handle_input_focus(k: KeyEvent) -> Option<Action> {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    match k.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Generate),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::F(2) => Some(Action::CycleMethod),
        KeyCode::F(5) => Some(Action::RefreshGallery),
        KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
        KeyCode::Char('g') if ctrl => Some(Action::ToggleGallery),
        KeyCode::Char('e') if ctrl => Some(Action::Export),
        KeyCode::Char('s') if ctrl => Some(Action::LoadStats),
        KeyCode::Char('t') if ctrl => Some(Action::CycleMethod),
        KeyCode::Char(c) if !ctrl && !k.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

fn handle_gallery_focus(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('/') => Some(Action::FocusInput),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::End | KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('x') => Some(Action::DeleteSelected),
        KeyCode::F(5) | KeyCode::Char('r') => Some(Action::RefreshGallery),
        KeyCode::Char('o') => Some(Action::ToggleGallery),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('s') => Some(Action::LoadStats),
        KeyCode::F(2) | KeyCode::Char('m') => Some(Action::CycleMethod),
        KeyCode::F(1) | KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}
