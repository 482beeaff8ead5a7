//! HTTP client for the TVmaze API
//!
//! This module provides a thin HTTP client that issues a single GET per call
//! and hands back the raw JSON body. There is no retry, caching or rate
//! limiting: every user action maps to exactly one request.

use std::time::Duration;

use crate::error::{Result, TvMazeError};

/// Default base URL for the TVmaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Default User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("tvmaze-core/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "TVMAZE_BASE_URL";

/// Environment variable overriding the request timeout (seconds)
pub const TIMEOUT_ENV: &str = "TVMAZE_TIMEOUT_SECS";

/// Configuration for the TVmaze HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL without trailing slash (default: https://api.tvmaze.com)
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from the process environment.
    ///
    /// Reads `TVMAZE_BASE_URL` and `TVMAZE_TIMEOUT_SECS`, falling back to
    /// the defaults for unset variables.
    ///
    /// # Errors
    /// Returns `TvMazeError::InvalidConfig` if a variable is set but unusable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                TvMazeError::InvalidConfig(format!("{} must be a number, got {:?}", TIMEOUT_ENV, timeout))
            })?;
            if secs == 0 {
                return Err(TvMazeError::InvalidConfig(format!(
                    "{} must be greater than zero",
                    TIMEOUT_ENV
                )));
            }
            config.timeout_secs = secs;
        }

        Ok(config)
    }

    /// Replace the base URL, normalizing away any trailing slash.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(TvMazeError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }
}

/// HTTP client for the TVmaze API
pub struct TvMazeClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// API base URL without trailing slash
    base_url: String,
}

impl TvMazeClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the JSON body of an API path.
    ///
    /// # Arguments
    /// * `path` - Path and query relative to the base URL (e.g. "/shows/1/episodes")
    ///
    /// # Errors
    /// - `TvMazeError::HttpError` - Network failure or unreadable body
    /// - `TvMazeError::Status` - Any non-2xx response
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url(), path);
        tracing::debug!(%url, "requesting");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(TvMazeError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}
