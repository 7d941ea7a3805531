use crossterm::event::KeyCode;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::dispatch::{BackendEvent, Request};
use crate::domain::{Commit, Entry, NO_COMMITS_PLACEHOLDER};
use crate::error::Result;
use crate::holder::Holder;
use crate::page::resolve_repository;

/// Commit search scoped to a single repository
#[derive(Debug)]
pub struct CommitSearchController {
    repository: String,
    clear_on_search: bool,
    show_empty_placeholder: bool,
    input: String,
    holder: Holder,
}

impl CommitSearchController {
    /// Build the controller for the repository named by a page URL or path
    pub fn from_page(page: &str, ui: &UiConfig) -> Result<Self> {
        let repository = resolve_repository(page)?;
        Ok(Self::for_repository(repository, ui))
    }

    pub fn for_repository(repository: impl Into<String>, ui: &UiConfig) -> Self {
        Self {
            repository: repository.into(),
            clear_on_search: ui.clear_on_search,
            show_empty_placeholder: ui.show_empty_placeholder,
            input: String::new(),
            holder: Holder::new(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn holder(&self) -> &Holder {
        &self.holder
    }

    pub fn holder_mut(&mut self) -> &mut Holder {
        &mut self.holder
    }

    /// Handle a key while the search box has focus. Only Enter submits.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Request> {
        match key {
            KeyCode::Enter => Some(self.submit()),
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            _ => None,
        }
    }

    pub fn submit(&mut self) -> Request {
        if self.clear_on_search {
            self.holder.clear();
        }
        info!("Searching {} for {:?}", self.repository, self.input);
        Request::Commits {
            repo: self.repository.clone(),
            term: self.input.clone(),
        }
    }

    pub fn render(&mut self, commits: Option<&[Commit]>) {
        match commits {
            Some(commits) if !commits.is_empty() => {
                for commit in commits {
                    self.holder.append(Entry::CommitLink(commit.clone()));
                }
            }
            _ if self.show_empty_placeholder => {
                self.holder
                    .append(Entry::Placeholder(NO_COMMITS_PLACEHOLDER.to_string()));
            }
            _ => {}
        }
    }

    /// URL of the commit under the list cursor
    pub fn selected_url(&self) -> Option<&str> {
        self.holder.selected().and_then(Entry::url)
    }

    pub fn apply(&mut self, event: &BackendEvent) {
        if let BackendEvent::CommitsLoaded {
            repo,
            term,
            commits,
        } = event
        {
            if *repo != self.repository {
                debug!("Ignoring commits for {} while viewing {}", repo, self.repository);
                return;
            }
            debug!(
                "Rendering {} commits for {:?}",
                commits.as_ref().map_or(0, Vec::len),
                term
            );
            self.render(commits.as_deref());
        }
    }
}
