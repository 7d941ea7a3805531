use anyhow::Result;
use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::dispatch::{Completion, Dispatcher};
use crate::tui::{TuiMessage, TuiModel, TuiUpdate, TuiView};

/// How long to wait for a key before checking for backend completions
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Drives the UI: draws the model, feeds keys to the update function and
/// applies backend completions as they arrive.
pub struct App {
    model: TuiModel,
    dispatcher: Dispatcher,
    completions: Receiver<Completion>,
}

impl App {
    pub fn new(model: TuiModel, dispatcher: Dispatcher, completions: Receiver<Completion>) -> Self {
        Self {
            model,
            dispatcher,
            completions,
        }
    }

    pub fn model(&self) -> &TuiModel {
        &self.model
    }

    /// Issue the requests the dashboard needs when it first opens
    pub fn start(&mut self) {
        let requests = self.model.initialize();
        info!("Initializing dashboard with {} requests", requests.len());
        self.dispatcher.dispatch_all(requests);
    }

    /// Apply every completion that has already arrived. Returns how many were applied.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            debug!("Applying completion #{}", completion.seq);
            self.model.apply_completion(&completion);
            applied += 1;
        }
        applied
    }

    /// Act on the result of a key press
    pub fn handle_message(&mut self, message: TuiMessage) {
        match message {
            TuiMessage::Request(request) => {
                self.dispatcher.dispatch(request);
            }
            TuiMessage::OpenUrl(url) => {
                info!("Opening {}", url);
                if let Err(e) = open::that_detached(&url) {
                    error!("Failed to open {}: {}", url, e);
                    self.model.add_error(format!("Could not open {}: {}", url, e));
                }
            }
            TuiMessage::Quit => {
                info!("Quit requested by user");
                self.model.should_quit = true;
            }
            TuiMessage::None => {}
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        let mut needs_redraw = true;
        loop {
            if self.drain_completions() > 0 {
                needs_redraw = true;
            }

            if needs_redraw {
                let size = terminal.size()?;
                self.model.list_height = TuiView::list_height(size.height);
                terminal.draw(|frame| TuiView::render(&self.model, frame))?;
                needs_redraw = false;
            }

            if event::poll(INPUT_POLL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let message = TuiUpdate::handle_key(&mut self.model, key.code, key.modifiers);
                        self.handle_message(message);
                        needs_redraw = true;
                    }
                    Event::Resize(_, _) => needs_redraw = true,
                    _ => {}
                }
            }

            if self.model.should_quit {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendPort;
    use crate::config::UiConfig;
    use crate::dispatch::Request;
    use crate::domain::Commit;
    use std::sync::Arc;
    use std::time::Instant;

    struct StaticBackend;

    impl BackendPort for StaticBackend {
        fn repositories(&self, _term: Option<&str>) -> crate::Result<Vec<String>> {
            Ok(vec!["repoA".to_string()])
        }

        fn active_repositories(&self) -> crate::Result<Vec<String>> {
            Ok(vec!["one".to_string(), "two".to_string()])
        }

        fn activate(&self, _name: &str) -> crate::Result<String> {
            Ok(String::new())
        }

        fn refresh_repositories(&self) -> crate::Result<()> {
            Ok(())
        }

        fn commits(&self, _repo: &str, _term: &str) -> crate::Result<Option<Vec<Commit>>> {
            Ok(Some(Vec::new()))
        }
    }

    fn app() -> App {
        let (dispatcher, rx) = Dispatcher::new(Arc::new(StaticBackend));
        App::new(TuiModel::new(UiConfig::default()), dispatcher, rx)
    }

    fn wait_for(app: &mut App, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = 0;
        while seen < count && Instant::now() < deadline {
            seen += app.drain_completions();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(seen, count, "timed out waiting for completions");
    }

    #[test]
    fn test_start_loads_active_repositories() {
        let mut app = app();
        app.start();
        wait_for(&mut app, 1);

        let names: Vec<_> = app
            .model()
            .dashboard
            .holder()
            .entries()
            .iter()
            .map(|e| e.label().to_string())
            .collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_refresh_reports_status_message() {
        let mut app = app();
        app.handle_message(TuiMessage::Request(Request::Refresh));
        wait_for(&mut app, 1);
        assert_eq!(
            app.model().messages.last().map(String::as_str),
            Some("Repository list refreshed")
        );
    }

    #[test]
    fn test_quit_message_stops_the_loop() {
        let mut app = app();
        app.handle_message(TuiMessage::Quit);
        assert!(app.model().should_quit);
    }
}
