use tracing::{info, warn};

use crate::commits::CommitSearchController;
use crate::config::UiConfig;
use crate::dashboard::DashboardController;
use crate::dispatch::{BackendEvent, Completion, Request};
use crate::error::Result;

/// Status messages kept around for the status bar
const MAX_MESSAGES: usize = 20;

/// The TUI Model - the complete UI state
#[derive(Debug)]
pub struct TuiModel {
    /// Dashboard page, lives for the whole session
    pub dashboard: DashboardController,

    /// Commit search page, rebuilt whenever a repository is opened
    pub commits: Option<CommitSearchController>,

    pub screen: Screen,
    pub focus: Focus,

    /// Error messages to display
    pub errors: Vec<String>,

    /// Status messages to display
    pub messages: Vec<String>,

    /// Sequence number of the most recently applied completion
    pub last_applied: Option<u64>,

    pub show_help: bool,
    pub should_quit: bool,

    /// Rows available to the list pane, updated by the view
    pub list_height: usize,

    ui: UiConfig,
}

/// Which page is on screen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Dashboard,
    Commits,
}

/// Which widget receives keys
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    List,
}

impl TuiModel {
    pub fn new(ui: UiConfig) -> Self {
        Self {
            dashboard: DashboardController::new(&ui),
            commits: None,
            screen: Screen::default(),
            focus: Focus::default(),
            errors: Vec::new(),
            messages: Vec::new(),
            last_applied: None,
            show_help: false,
            should_quit: false,
            list_height: 0,
            ui,
        }
    }

    /// Requests the dashboard needs on first display
    pub fn initialize(&mut self) -> Vec<Request> {
        self.dashboard.initialize()
    }

    /// Switch to the commit search of a repository
    pub fn open_repository(&mut self, name: &str) {
        info!("Opening commit search for {}", name);
        self.commits = Some(CommitSearchController::for_repository(name, &self.ui));
        self.screen = Screen::Commits;
        self.focus = Focus::Input;
    }

    /// Switch to the commit search of the repository named by a page URL or path
    pub fn open_page(&mut self, page: &str) -> Result<()> {
        let controller = CommitSearchController::from_page(page, &self.ui)?;
        info!("Opening commit search for {}", controller.repository());
        self.commits = Some(controller);
        self.screen = Screen::Commits;
        self.focus = Focus::Input;
        Ok(())
    }

    pub fn back_to_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        self.focus = Focus::Input;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
    }

    /// Apply a finished backend request to whichever page it concerns
    pub fn apply_completion(&mut self, completion: &Completion) {
        if let Some(last) = self.last_applied {
            if completion.seq < last {
                info!(
                    "Completion #{} arrived after #{}; rendering in arrival order",
                    completion.seq, last
                );
            }
        }
        self.last_applied = Some(completion.seq);

        match &completion.event {
            BackendEvent::Failed { request, message } => {
                warn!("Request {:?} failed: {}", request, message);
                self.add_error(message.clone());
            }
            BackendEvent::Refreshed => {
                self.add_message("Repository list refreshed".to_string());
            }
            BackendEvent::Activated { name, .. } => {
                self.add_message(format!("Activated {}", name));
                self.dashboard.apply(&completion.event);
            }
            BackendEvent::CommitsLoaded { .. } => {
                if let Some(commits) = self.commits.as_mut() {
                    commits.apply(&completion.event);
                }
            }
            event => self.dashboard.apply(event),
        }
    }

    /// Add a status message
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Add an error message
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
        if self.errors.len() > MAX_MESSAGES {
            self.errors.remove(0);
        }
    }

    /// Clear all error messages
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}
