use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::{CommitsRoute, ServerConfig};
use crate::domain::{Commit, RepositoryRecord};
use crate::error::{ClientError, Result};

/// Port for the commit-search backend
pub trait BackendPort: Send + Sync {
    /// Repository names matching an autocomplete term, or all of them
    fn repositories(&self, term: Option<&str>) -> Result<Vec<String>>;

    /// Names of the repositories currently in the backend's working set
    fn active_repositories(&self) -> Result<Vec<String>>;

    /// Mark a repository active. Returns the raw response body.
    fn activate(&self, name: &str) -> Result<String>;

    /// Ask the backend to refresh its repository cache
    fn refresh_repositories(&self) -> Result<()>;

    /// Commits of `repo` matching `term`. `None` when the backend answers `null`.
    fn commits(&self, repo: &str, term: &str) -> Result<Option<Vec<Commit>>>;
}

/// Builds endpoint URLs relative to the configured server
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    commits_route: CommitsRoute,
}

impl Endpoints {
    pub fn new(base_url: &str, commits_route: CommitsRoute) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            input: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                input: base_url.to_string(),
                reason: "not a hierarchical url".to_string(),
            });
        }
        Ok(Self {
            base,
            commits_route,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was ruled out in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn repositories(&self, term: Option<&str>) -> Url {
        let mut url = self.endpoint(&["repositories"]);
        if let Some(term) = term {
            url.query_pairs_mut().append_pair("term", term);
        }
        url
    }

    pub fn active_repositories(&self) -> Url {
        self.endpoint(&["repositories", "active"])
    }

    pub fn activate(&self) -> Url {
        self.endpoint(&["repositories", "activate"])
    }

    pub fn refresh_repositories(&self) -> Url {
        self.endpoint(&["refresh", "repositories"])
    }

    pub fn commits(&self, repo: &str, term: &str) -> Url {
        match self.commits_route {
            CommitsRoute::Dashboard => {
                let mut url = self.endpoint(&["dashboard", repo, "commits"]);
                url.query_pairs_mut().append_pair("term", term);
                url
            }
            CommitsRoute::Plain => self.endpoint(&[repo, "commits"]),
        }
    }
}

/// Decode a JSON body, unwrapping one level of string encoding.
///
/// Some backend handlers encode their payload twice, so a body that parses to
/// a JSON string is parsed again as the actual document.
pub fn decode_body<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T> {
    let decode_err = |source| ClientError::Decode {
        url: url.to_string(),
        source,
    };

    let value: Value = serde_json::from_str(body).map_err(decode_err)?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(decode_err)?,
        other => other,
    };
    serde_json::from_value(value).map_err(decode_err)
}

/// Blocking HTTP adapter for [`BackendPort`]
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let endpoints = Endpoints::new(&server.base_url, server.commits_route)?;
        Self::with_endpoints(endpoints, server.timeout)
    }

    pub fn with_endpoints(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("commitdash/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Http {
                url: endpoints.base.to_string(),
                source,
            })?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn get(&self, url: Url) -> Result<(Url, String)> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;
        let body = Self::read_body(&url, response)?;
        Ok((url, body))
    }

    fn read_body(url: &Url, response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().map_err(|source| ClientError::Http {
            url: url.to_string(),
            source,
        })
    }

    fn names(&self, url: Url) -> Result<Vec<String>> {
        let (url, body) = self.get(url)?;
        let records: Option<Vec<RepositoryRecord>> = decode_body(&url, &body)?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(RepositoryRecord::into_name)
            .collect())
    }
}

impl BackendPort for HttpBackend {
    fn repositories(&self, term: Option<&str>) -> Result<Vec<String>> {
        self.names(self.endpoints.repositories(term))
    }

    fn active_repositories(&self) -> Result<Vec<String>> {
        self.names(self.endpoints.active_repositories())
    }

    fn activate(&self, name: &str) -> Result<String> {
        let url = self.endpoints.activate();
        debug!("POST {} name={}", url, name);
        let response = self
            .client
            .post(url.clone())
            .form(&[("name", name)])
            .send()
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;
        Self::read_body(&url, response)
    }

    fn refresh_repositories(&self) -> Result<()> {
        self.get(self.endpoints.refresh_repositories())?;
        Ok(())
    }

    fn commits(&self, repo: &str, term: &str) -> Result<Option<Vec<Commit>>> {
        let (url, body) = self.get(self.endpoints.commits(repo, term))?;
        decode_body(&url, &body)
    }
}
