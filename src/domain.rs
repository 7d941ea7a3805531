use serde::{Deserialize, Serialize};

/// Shown in place of commit links when a search matches nothing
pub const NO_COMMITS_PLACEHOLDER: &str = "No commits found...";

/// One element of a repository list response.
///
/// The backend answers either with bare names or with repository objects
/// carrying a `name` field alongside other bookkeeping we don't model.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryRecord {
    Name(String),
    Object { name: String },
}

impl RepositoryRecord {
    pub fn into_name(self) -> String {
        match self {
            RepositoryRecord::Name(name) => name,
            RepositoryRecord::Object { name } => name,
        }
    }
}

/// A commit as returned by the commit search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(rename = "commit_message", alias = "message")]
    pub message: String,
    #[serde(rename = "html_url", alias = "url")]
    pub url: String,
}

/// A rendered line in one of the list panes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// An active repository on the dashboard
    Repository(String),
    /// A free-form log line
    Text(String),
    /// A commit rendered as a link to its web page
    CommitLink(Commit),
    /// Stand-in shown when there is nothing to list
    Placeholder(String),
}

impl Entry {
    pub fn label(&self) -> &str {
        match self {
            Entry::Repository(name) => name.as_str(),
            Entry::Text(text) => text.as_str(),
            Entry::CommitLink(commit) => commit.message.as_str(),
            Entry::Placeholder(text) => text.as_str(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Entry::CommitLink(commit) => Some(commit.url.as_str()),
            _ => None,
        }
    }
}
