use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use moodcheck_core::{fetch, PendingRequest};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{App, Focus};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent, tx: &UnboundedSender<AppEvent>) -> Result<()> {
    match event {
        AppEvent::Key(key) => {
            if let Some(request) = handle_key(app, key) {
                spawn_request(app, request, tx);
            }
        }
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Settled(settled) => {
            app.dispatch(settled);
        }
    }
    Ok(())
}

/// Run the request off the event loop; its result comes back as `AppEvent::Settled`
fn spawn_request(app: &App, request: PendingRequest, tx: &UnboundedSender<AppEvent>) {
    let transport = app.transport();
    let tx = tx.clone();
    tokio::spawn(async move {
        let settled = fetch(transport.as_ref(), request).await;
        if tx.send(AppEvent::Settled(settled)).is_err() {
            tracing::debug!("event loop closed before request settled");
        }
    });
}

fn handle_key(app: &mut App, key: KeyEvent) -> Option<PendingRequest> {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    if key.code == KeyCode::Tab {
        app.toggle_focus();
        return None;
    }

    match app.focus {
        Focus::Moods => handle_moods(app, key),
        Focus::Input => handle_input(app, key),
    }
}

fn handle_moods(app: &mut App, key: KeyEvent) -> Option<PendingRequest> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.focus = Focus::Input;
            return None;
        }
        _ => {}
    }

    // Mood buttons are disabled while a request is in flight
    if app.is_loading() {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.mood_left(),
        KeyCode::Right | KeyCode::Char('l') => app.mood_right(),
        KeyCode::Enter | KeyCode::Char(' ') => return app.select_highlighted_mood(),
        KeyCode::Char(c) => {
            if let Some(n) = c.to_digit(10).filter(|n| *n > 0) {
                return app.select_mood(n as usize - 1);
            }
        }
        _ => {}
    }
    None
}

fn handle_input(app: &mut App, key: KeyEvent) -> Option<PendingRequest> {
    if matches!(key.code, KeyCode::Esc | KeyCode::Up) {
        app.focus = Focus::Moods;
        return None;
    }

    // The text box is disabled while a request is in flight
    if app.is_loading() {
        return None;
    }

    match key.code {
        KeyCode::Enter => return app.submit_free_text(),
        KeyCode::Backspace => app.delete_before_cursor(),
        KeyCode::Delete => app.delete_at_cursor(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
    None
}
