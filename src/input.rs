use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::effects::Effect;
use crate::form::FormField;
use crate::models::Screen;
use crate::state::{AppState, ArticlesFocus};

pub enum KeyOutcome {
    Continue(Vec<Effect>),
    Quit,
}

impl KeyOutcome {
    fn none() -> Self {
        KeyOutcome::Continue(Vec::new())
    }
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys: quit, logout, navigation.
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return KeyOutcome::Quit,
        KeyCode::Char('o') if ctrl => return KeyOutcome::Continue(state.logout()),
        KeyCode::F(1) => return KeyOutcome::Continue(state.navigate(Screen::Login)),
        KeyCode::F(2) => return KeyOutcome::Continue(state.navigate(Screen::Articles)),
        _ => {}
    }

    match state.screen {
        Screen::Login => handle_login_key(key, ctrl, state),
        Screen::Articles => match state.focus {
            ArticlesFocus::List => handle_list_key(key, state),
            ArticlesFocus::Form => handle_form_key(key, ctrl, state),
        },
    }
}

fn handle_login_key(key: KeyEvent, ctrl: bool, state: &mut AppState) -> KeyOutcome {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => state.login.toggle_focus(),
        KeyCode::Enter => return KeyOutcome::Continue(state.submit_login()),
        KeyCode::Backspace => state.login.pop_char(),
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char(c) if !ctrl => state.login.push_char(c),
        _ => {}
    }
    KeyOutcome::none()
}

fn handle_list_key(key: KeyEvent, state: &mut AppState) -> KeyOutcome {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_article().map(|a| a.article_id) {
                state.set_current_article(id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = state.selected_article().map(|a| a.article_id) {
                return KeyOutcome::Continue(state.delete(id));
            }
        }
        KeyCode::Char('r') => return KeyOutcome::Continue(state.list()),
        KeyCode::Char('n') | KeyCode::Tab => state.focus = ArticlesFocus::Form,
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
        _ => {}
    }
    KeyOutcome::none()
}

fn handle_form_key(key: KeyEvent, ctrl: bool, state: &mut AppState) -> KeyOutcome {
    let form = &mut state.form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Left if form.focus == FormField::Topic => form.cycle_topic(false),
        KeyCode::Right | KeyCode::Char(' ') if form.focus == FormField::Topic => form.cycle_topic(true),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Esc => {
            form.reset();
            state.focus = ArticlesFocus::List;
        }
        KeyCode::Enter => {
            let effects = state.submit_form();
            if !effects.is_empty() {
                state.focus = ArticlesFocus::List;
            }
            return KeyOutcome::Continue(effects);
        }
        KeyCode::Char(c) if !ctrl => form.push_char(c),
        _ => {}
    }
    KeyOutcome::none()
}
