//! Client configuration read from the environment.

use std::time::Duration;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::service::HttpTodoService;
use crate::transport::ReqwestTransport;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4567/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BASE_URL_VAR: &str = "TODO_API_URL";
const TIMEOUT_VAR: &str = "TODO_API_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; the todo collection lives at `<base_url>/todos`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads `TODO_API_URL` and `TODO_API_TIMEOUT_MS`, falling back to the
    /// defaults for unset or unparsable values. A zero timeout counts as invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {TIMEOUT_VAR}");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };
        Self { base_url, timeout }
    }

    /// An HTTP-backed service for this configuration.
    pub fn connect(&self) -> Result<HttpTodoService<ReqwestTransport>, ApiError> {
        let transport = ReqwestTransport::new(self.timeout)?;
        Ok(HttpTodoService::new(TodoClient::new(&self.base_url), transport))
    }
}
