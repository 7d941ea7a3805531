use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:9000";

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub commits_route: CommitsRoute,
    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    #[serde(rename = "timeout_secs", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

/// Shape of the commit search endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitsRoute {
    /// `GET /dashboard/{repo}/commits?term={term}`
    #[default]
    Dashboard,
    /// `GET /{repo}/commits`, no search term
    Plain,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub min_search_chars: usize,
    pub clear_on_search: bool,
    pub show_empty_placeholder: bool,
    pub preload_repositories: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            commits_route: CommitsRoute::default(),
            timeout: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            min_search_chars: 2,
            clear_on_search: true,
            show_empty_placeholder: true,
            preload_repositories: false,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "commitdash").context("Failed to determine project directories")
}

pub fn get_default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("commitdash.toml"))
}

pub fn get_default_log_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("commitdash.log"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: &CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config.clone())?;

        // CLI args override config file
        if let Some(server_url) = &cli_args.server_url {
            config.server.base_url = server_url.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.server.base_url, "http://localhost:9000");
        assert_eq!(config.server.commits_route, CommitsRoute::Dashboard);
        assert_eq!(config.server.timeout, None);
        assert_eq!(config.ui.min_search_chars, 2);
        assert!(config.ui.clear_on_search);
        assert!(config.ui.show_empty_placeholder);
        assert!(!config.ui.preload_repositories);
    }

    #[test]
    fn test_config_serialization_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.server.base_url = "http://search.internal:8080".to_string();
        config.server.commits_route = CommitsRoute::Plain;
        config.server.timeout = Some(Duration::from_secs(15));
        config.ui.clear_on_search = false;

        let toml_str = toml::to_string(&config)?;
        assert!(toml_str.contains("timeout_secs = 15"));
        assert!(toml_str.contains("commits_route = \"plain\""));

        let parsed_config: Config = toml::from_str(&toml_str)?;
        assert_eq!(config, parsed_config);
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let parsed: Config = toml::from_str(
            r#"
version = 1

[ui]
min_search_chars = 3
"#,
        )?;
        assert_eq!(parsed.server, ServerConfig::default());
        assert_eq!(parsed.ui.min_search_chars, 3);
        assert!(parsed.ui.show_empty_placeholder);
        Ok(())
    }

    #[test]
    fn test_partial_server_table_fills_defaults() -> Result<()> {
        let parsed: Config = toml::from_str(
            r#"
version = 1

[server]
commits_route = "plain"
timeout_secs = 5
"#,
        )?;
        assert_eq!(parsed.server.base_url, DEFAULT_SERVER_URL);
        assert_eq!(parsed.server.commits_route, CommitsRoute::Plain);
        assert_eq!(parsed.server.timeout, Some(Duration::from_secs(5)));
        Ok(())
    }

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("commitdash.toml");

        let config = Config::load(Some(config_path.clone()))?;

        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_load_rejects_garbage() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "version = \"one\"")?;

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn test_cli_override() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let original_config = Config::default();
        original_config.save(&config_path)?;

        let cli_args = CliArgs {
            server_url: Some("http://override:1234".to_string()),
            config: Some(config_path),
            page: None,
            log_file: None,
        };

        let final_config = Config::from_cli_and_file(&cli_args)?;
        assert_eq!(final_config.server.base_url, "http://override:1234");

        Ok(())
    }

    #[test]
    fn test_default_paths() -> Result<()> {
        assert!(get_default_config_path()?.ends_with("commitdash.toml"));
        assert!(get_default_log_path()?.ends_with("commitdash.log"));
        Ok(())
    }
}
