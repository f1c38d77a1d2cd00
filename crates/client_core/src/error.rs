use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the book collection endpoint.
///
/// Controllers never hand this to their callers; they log it and reduce it to a
/// banner message.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Text the server sent along with a non-success status, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid backend url '{value}': {reason}")]
    InvalidBackendUrl { value: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} field '{name}'")]
pub struct UnknownField {
    pub kind: &'static str,
    pub name: String,
}
