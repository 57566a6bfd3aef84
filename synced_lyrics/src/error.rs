use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a lyrics lookup can fail.
///
/// None of these are recoverable from the client's point of view: the client
/// never retries, it only reports which stage went wrong.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller asked for something the client cannot express, e.g. an empty track id.
    #[error("usage error: {0}")]
    Usage(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the `{var}` environment variable is not set or empty")]
    MissingSecret { var: &'static str },

    #[error("the sp_dc cookie was rejected: {reason}")]
    InvalidSecret { reason: String },

    #[error("invalid endpoint URL `{url}`: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no lyrics found for track `{track_id}`")]
    NotFound { track_id: String },

    #[error("request was not authorized (status code: {0})")]
    Unauthorized(StatusCode),

    #[error("request to {url} failed with status code: {status}")]
    Status { status: StatusCode, url: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl Error {
    /// returns `true` if the provider has no lyrics for the requested track
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Provider(ProviderError::NotFound { .. }))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider(ProviderError::Http(err))
    }
}
