//! Agent endpoint configuration shared by both views

use std::time::Duration;

/// Address the agent backend listens on during local development
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Per-request timeout applied when none is given
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where to reach the agent and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl AgentConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}
