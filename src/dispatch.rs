use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

use crate::backend::BackendPort;
use crate::domain::Commit;

/// A backend call requested by one of the controllers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Load the active repository list
    ActiveRepositories,
    /// Autocomplete suggestions for a partial name
    Suggestions { term: String },
    /// Warm the backend's repository list; the result is discarded
    PreloadRepositories,
    /// Mark a repository active
    Activate { name: String },
    /// Refresh the backend's repository cache
    Refresh,
    /// Search the commits of a repository
    Commits { repo: String, term: String },
}

/// Outcome of a [`Request`], delivered back to the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    ActiveLoaded { names: Vec<String> },
    SuggestionsLoaded { term: String, names: Vec<String> },
    RepositoriesPreloaded { count: usize },
    Activated { name: String, body: String },
    Refreshed,
    CommitsLoaded {
        repo: String,
        term: String,
        commits: Option<Vec<Commit>>,
    },
    Failed { request: Request, message: String },
}

/// A finished request tagged with the order it was issued in
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub seq: u64,
    pub event: BackendEvent,
}

/// Run one request to completion against the backend
pub fn execute(backend: &dyn BackendPort, request: Request) -> BackendEvent {
    let outcome = match &request {
        Request::ActiveRepositories => backend
            .active_repositories()
            .map(|names| BackendEvent::ActiveLoaded { names }),
        Request::Suggestions { term } => {
            backend
                .repositories(Some(term.as_str()))
                .map(|names| BackendEvent::SuggestionsLoaded {
                    term: term.clone(),
                    names,
                })
        }
        Request::PreloadRepositories => backend
            .repositories(None)
            .map(|names| BackendEvent::RepositoriesPreloaded { count: names.len() }),
        Request::Activate { name } => backend.activate(name).map(|body| BackendEvent::Activated {
            name: name.clone(),
            body,
        }),
        Request::Refresh => backend.refresh_repositories().map(|()| BackendEvent::Refreshed),
        Request::Commits { repo, term } => {
            backend
                .commits(repo, term)
                .map(|commits| BackendEvent::CommitsLoaded {
                    repo: repo.clone(),
                    term: term.clone(),
                    commits,
                })
        }
    };

    outcome.unwrap_or_else(|e| {
        warn!("Backend request {:?} failed: {}", request, e);
        BackendEvent::Failed {
            message: e.to_string(),
            request,
        }
    })
}

/// Fires requests at the backend, one thread per request.
///
/// Requests are independent: nothing is cancelled, queued behind another
/// request or reordered, so completions arrive in whatever order the
/// backend answers.
pub struct Dispatcher {
    backend: Arc<dyn BackendPort>,
    tx: Sender<Completion>,
    next_seq: u64,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn BackendPort>) -> (Self, Receiver<Completion>) {
        let (tx, rx) = unbounded();
        let dispatcher = Self {
            backend,
            tx,
            next_seq: 0,
        };
        (dispatcher, rx)
    }

    /// Issue a request and return its sequence number
    pub fn dispatch(&mut self, request: Request) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        debug!("Dispatching #{} {:?}", seq, request);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = execute(backend.as_ref(), request);
            // Receiver gone means the UI has shut down
            let _ = tx.send(Completion { seq, event });
        });
        seq
    }

    pub fn dispatch_all(&mut self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.dispatch(request);
        }
    }
}
