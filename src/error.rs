use thiserror::Error;

/// Errors raised while talking to the commit-search backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid server url {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("No repository name in page path: {page}")]
    EmptyRepository { page: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
