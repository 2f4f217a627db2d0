//! Error types for talking to the agent

/// Input rejected before any request is made
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("question is empty")]
    EmptyQuestion,
}

/// A failed round trip to the agent endpoint.
///
/// Only the display text reaches the UI, so variants carry strings rather
/// than the underlying `reqwest` / `serde_json` errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("API error: {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl RequestError {
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RequestError::Transport(format!("timed out: {error}"))
        } else {
            RequestError::Transport(error.to_string())
        }
    }
}
