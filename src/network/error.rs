//! Errors raised while talking to the REST API

use thiserror::Error;

/// Failure of a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),

    #[error("API response for {0} carried no record")]
    MissingBody(String),

    #[error("invalid API setting: {0}")]
    InvalidSetting(String),
}

impl ApiError {
    /// HTTP status reported by the API, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
