use crossterm::event::{KeyCode, KeyModifiers};

use super::model::{Focus, Screen, TuiModel};
use crate::dispatch::Request;

/// What the main loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiMessage {
    /// Send a request to the backend
    Request(Request),

    /// Open a commit page in the system browser
    OpenUrl(String),

    /// Leave the application
    Quit,

    /// No action needed
    None,
}

/// The Update function - handles user input and updates the model
pub struct TuiUpdate;

impl TuiUpdate {
    /// Handle a key press and update the model accordingly
    pub fn handle_key(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> TuiMessage {
        if let Some(msg) = Self::handle_global_keys(model, key, modifiers) {
            return msg;
        }

        if model.show_help {
            // Any key closes help
            model.show_help = false;
            return TuiMessage::None;
        }

        match (model.screen, model.focus) {
            (Screen::Dashboard, Focus::Input) => Self::handle_dashboard_input(model, key),
            (Screen::Dashboard, Focus::List) => Self::handle_dashboard_list(model, key),
            (Screen::Commits, Focus::Input) => Self::handle_commits_input(model, key),
            (Screen::Commits, Focus::List) => Self::handle_commits_list(model, key),
        }
    }

    /// Handle global keys that work in any mode
    fn handle_global_keys(
        model: &mut TuiModel,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<TuiMessage> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(TuiMessage::Quit)
            }

            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(TuiMessage::Request(model.dashboard.refresh()))
            }

            KeyCode::F(5) => Some(TuiMessage::Request(model.dashboard.refresh())),

            KeyCode::Tab => {
                model.toggle_focus();
                Some(TuiMessage::None)
            }

            KeyCode::Esc => {
                if model.show_help {
                    model.show_help = false;
                } else if !model.errors.is_empty() {
                    model.clear_errors();
                } else if model.screen == Screen::Dashboard
                    && !model.dashboard.suggestions().is_empty()
                {
                    model.dashboard.close_suggestions();
                } else if model.screen == Screen::Commits {
                    model.back_to_dashboard();
                } else {
                    return Some(TuiMessage::Quit);
                }
                Some(TuiMessage::None)
            }

            _ => None,
        }
    }

    fn handle_dashboard_input(model: &mut TuiModel, key: KeyCode) -> TuiMessage {
        match model.dashboard.handle_key(key) {
            Some(request) => TuiMessage::Request(request),
            None => TuiMessage::None,
        }
    }

    fn handle_dashboard_list(model: &mut TuiModel, key: KeyCode) -> TuiMessage {
        let height = model.list_height;
        let holder = model.dashboard.holder_mut();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                holder.cursor_up();
                holder.follow_cursor(height);
                TuiMessage::None
            }

            KeyCode::Down | KeyCode::Char('j') => {
                holder.cursor_down();
                holder.follow_cursor(height);
                TuiMessage::None
            }

            KeyCode::Enter => {
                if let Some(name) = model.dashboard.selected_repository().map(str::to_string) {
                    model.open_repository(&name);
                }
                TuiMessage::None
            }

            KeyCode::Char('r') => TuiMessage::Request(model.dashboard.refresh()),

            KeyCode::Char('?') => {
                model.show_help = true;
                TuiMessage::None
            }

            KeyCode::Char('q') => TuiMessage::Quit,

            _ => TuiMessage::None,
        }
    }

    fn handle_commits_input(model: &mut TuiModel, key: KeyCode) -> TuiMessage {
        let Some(commits) = model.commits.as_mut() else {
            model.back_to_dashboard();
            return TuiMessage::None;
        };
        match commits.handle_key(key) {
            Some(request) => TuiMessage::Request(request),
            None => TuiMessage::None,
        }
    }

    fn handle_commits_list(model: &mut TuiModel, key: KeyCode) -> TuiMessage {
        let height = model.list_height;
        let Some(commits) = model.commits.as_mut() else {
            model.back_to_dashboard();
            return TuiMessage::None;
        };
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                commits.holder_mut().cursor_up();
                commits.holder_mut().follow_cursor(height);
                TuiMessage::None
            }

            KeyCode::Down | KeyCode::Char('j') => {
                commits.holder_mut().cursor_down();
                commits.holder_mut().follow_cursor(height);
                TuiMessage::None
            }

            KeyCode::Enter | KeyCode::Char('o') => match commits.selected_url() {
                Some(url) => TuiMessage::OpenUrl(url.to_string()),
                None => TuiMessage::None,
            },

            KeyCode::Char('b') | KeyCode::Backspace => {
                model.back_to_dashboard();
                TuiMessage::None
            }

            KeyCode::Char('?') => {
                model.show_help = true;
                TuiMessage::None
            }

            KeyCode::Char('q') => TuiMessage::Quit,

            _ => TuiMessage::None,
        }
    }
}
