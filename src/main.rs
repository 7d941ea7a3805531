use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use commitdash::app::App;
use commitdash::backend::HttpBackend;
use commitdash::cli::CliArgs;
use commitdash::config::{Config, get_default_log_path};
use commitdash::dispatch::Dispatcher;
use commitdash::tui::TuiModel;

fn init_tracing(log_file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match log_file {
        Some(p) => p,
        None => get_default_log_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    // The terminal belongs to the UI, so logs go to a file
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("commitdash=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let log_path = init_tracing(cli_args.log_file.clone())?;

    info!("Starting commitdash, logging to {}", log_path.display());

    let config = Config::from_cli_and_file(&cli_args)?;
    info!("Using backend at {}", config.server.base_url);

    let backend = HttpBackend::new(&config.server).context("Failed to set up backend client")?;
    let (dispatcher, completions) = Dispatcher::new(Arc::new(backend));

    let mut model = TuiModel::new(config.ui.clone());
    if let Some(page) = &cli_args.page {
        model.open_page(page)?;
    }
    let mut app = App::new(model, dispatcher, completions);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    info!("commitdash shut down cleanly");
    Ok(())
}
