use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "commitdash")]
#[command(about = "A terminal dashboard for browsing repositories and searching their commits")]
pub struct CliArgs {
    /// Base URL of the commit-search backend (overrides config)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Open the commit search for the repository named by the last segment of this URL or path
    #[arg(long)]
    pub page: Option<String>,

    /// Where to write logs (the terminal is taken by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
