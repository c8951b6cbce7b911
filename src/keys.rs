use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rust_i18n::t;

use crate::app::{App, AppScreen};
use crate::focus::{self, FocusTarget};
use crate::ui::line_input::InputResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Repeat events are fine for navigation, release events are not input
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
        return;
    }

    if handle_global_key(app, key) == KeyOutcome::Consumed {
        return;
    }

    if let Some(backward) = tab_direction(key) {
        app.focus_step(backward);
        return;
    }

    if app.manage.open {
        handle_manage_key(app, key);
    } else if app.learning.is_open() {
        handle_learning_key(app, key);
    } else {
        match app.screen {
            AppScreen::Home => handle_home_key(app, key),
            AppScreen::Category => handle_category_key(app, key),
        }
    }
}

fn tab_direction(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::BackTab => Some(true),
        KeyCode::Tab => Some(key.modifiers.contains(KeyModifiers::SHIFT)),
        _ => None,
    }
}

/// Keys that apply whichever screen is showing: Esc closes the topmost
/// layer, Tab stays inside the manage modal, arrows page the learning overlay.
pub fn handle_global_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    if key.code == KeyCode::Esc {
        if app.manage.open {
            app.close_manage();
            return KeyOutcome::Consumed;
        }
        if app.learning.is_open() {
            app.close_learning();
            return KeyOutcome::Consumed;
        }
    }

    if app.manage.open
        && let Some(backward) = tab_direction(key)
    {
        let focusable = app.manage_focusables();
        return match focus::contain_tab(&focusable, app.focus.as_ref(), backward) {
            Some(target) => {
                app.focus = Some(target);
                KeyOutcome::Consumed
            }
            None => KeyOutcome::Ignored,
        };
    }

    if app.learning.is_open() {
        match key.code {
            KeyCode::Right => {
                app.next_card();
                return KeyOutcome::Consumed;
            }
            KeyCode::Left => {
                app.prev_card();
                return KeyOutcome::Consumed;
            }
            _ => {}
        }
    }

    KeyOutcome::Ignored
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.home_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.home_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.open_category_at(app.home_selected),
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            app.open_category_at(index);
        }
        _ => {}
    }
}

fn handle_category_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.close_category(),
        KeyCode::Char('m') => app.open_manage(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_focused(),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            app.move_grid_focus(-1)
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            app.move_grid_focus(1)
        }
        _ => {}
    }
}

fn handle_learning_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('t') => app.toggle_term(),
        KeyCode::Char('h') => app.prev_card(),
        KeyCode::Char('l') => app.next_card(),
        KeyCode::Char('q') => app.close_learning(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.focus.as_ref().is_some_and(FocusTarget::in_learning_overlay) {
                app.activate_focused();
            } else {
                app.toggle_term();
            }
        }
        _ => {}
    }
}

fn handle_manage_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Up | KeyCode::Down) {
        let focusable = app.manage_focusables();
        app.focus_within(&focusable, key.code == KeyCode::Up);
        return;
    }

    match app.focus.clone() {
        Some(FocusTarget::TermInput) => {
            if app.manage.term.handle(key) == InputResult::Submit {
                app.submit_add_form();
            }
        }
        Some(FocusTarget::ImageInput) => {
            if app.manage.image_path.handle(key) == InputResult::Submit {
                app.submit_add_form();
            }
        }
        Some(FocusTarget::DeleteCard(id))
            if matches!(key.code, KeyCode::Delete | KeyCode::Char('x')) =>
        {
            app.delete_card(&id);
        }
        Some(target)
            if target.in_manage_modal() && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) =>
        {
            app.activate_focused();
        }
        _ => {}
    }
}

/// Footer hints for whichever layer currently receives keys.
pub fn hints(app: &App) -> Vec<String> {
    let keys: &[&str] = if app.notice.is_some() {
        &["hints.dismiss"]
    } else if app.manage.open {
        &["hints.manage_tab", "hints.manage_enter", "hints.manage_delete", "hints.close"]
    } else if app.learning.is_open() {
        &["hints.learning_arrows", "hints.learning_toggle", "hints.close"]
    } else if app.screen == AppScreen::Category {
        &["hints.category_move", "hints.category_open", "hints.category_manage", "hints.back"]
    } else {
        &["hints.home_select", "hints.home_open", "hints.quit"]
    };
    keys.iter().map(|key| t!(*key).to_string()).collect()
}
