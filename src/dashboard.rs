use crossterm::event::KeyCode;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::dispatch::{BackendEvent, Request};
use crate::domain::Entry;
use crate::holder::Holder;

/// The repository dashboard: active repositories plus an autocomplete box
/// for activating more of them.
#[derive(Debug)]
pub struct DashboardController {
    min_search_chars: usize,
    preload_repositories: bool,
    initialized: bool,
    input: String,
    suggestions: Vec<String>,
    highlighted: Option<usize>,
    holder: Holder,
}

impl DashboardController {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            min_search_chars: ui.min_search_chars,
            preload_repositories: ui.preload_repositories,
            initialized: false,
            input: String::new(),
            suggestions: Vec::new(),
            highlighted: None,
            holder: Holder::new(),
        }
    }

    /// Requests to issue when the dashboard first opens. Empty after the first call.
    pub fn initialize(&mut self) -> Vec<Request> {
        if self.initialized {
            return Vec::new();
        }
        self.initialized = true;

        let mut requests = vec![Request::ActiveRepositories];
        if self.preload_repositories {
            requests.push(Request::PreloadRepositories);
        }
        requests
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn holder(&self) -> &Holder {
        &self.holder
    }

    pub fn holder_mut(&mut self) -> &mut Holder {
        &mut self.holder
    }

    /// Handle a key while the search box has focus
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Request> {
        match key {
            KeyCode::Char(c) => {
                self.input.push(c);
                self.suggest()
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.suggest()
            }
            KeyCode::Down => {
                self.highlight_next();
                None
            }
            KeyCode::Up => {
                self.highlight_prev();
                None
            }
            KeyCode::Enter => self.select(),
            _ => None,
        }
    }

    fn suggest(&mut self) -> Option<Request> {
        if self.input.is_empty() || self.input.chars().count() < self.min_search_chars {
            self.suggestions.clear();
            self.highlighted = None;
            return None;
        }
        Some(Request::Suggestions {
            term: self.input.clone(),
        })
    }

    pub fn highlight_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Accept the highlighted suggestion, logging the choice and activating it
    pub fn select(&mut self) -> Option<Request> {
        let chosen = self
            .highlighted
            .and_then(|i| self.suggestions.get(i))
            .cloned();

        match chosen {
            Some(name) => {
                info!("Selected repository {}", name);
                self.holder.append(Entry::Text(name.clone()));
                self.input.clear();
                self.suggestions.clear();
                self.highlighted = None;
                Some(Request::Activate { name })
            }
            None => {
                self.holder.append(Entry::Text(format!(
                    "Nothing selected, input was {}",
                    self.input
                )));
                None
            }
        }
    }

    /// Hide the dropdown without touching the typed input
    pub fn close_suggestions(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
    }

    pub fn refresh(&self) -> Request {
        Request::Refresh
    }

    /// Name of the repository under the list cursor, if it is one
    pub fn selected_repository(&self) -> Option<&str> {
        match self.holder.selected() {
            Some(Entry::Repository(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: &BackendEvent) {
        match event {
            BackendEvent::ActiveLoaded { names } => {
                for name in names {
                    self.holder.append(Entry::Repository(name.clone()));
                }
            }
            BackendEvent::SuggestionsLoaded { term, names } => {
                // Answers to an older prefix are dropped
                if *term != self.input {
                    debug!("Dropping stale suggestions for {:?}", term);
                    return;
                }
                self.suggestions = names.clone();
                self.highlighted = None;
            }
            BackendEvent::RepositoriesPreloaded { count } => {
                debug!("Backend knows {} repositories", count);
            }
            BackendEvent::Activated { name, body } => {
                debug!("Activated {}: {}", name, body);
            }
            _ => {}
        }
    }
}
