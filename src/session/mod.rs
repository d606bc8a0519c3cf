//! Transport session
//!
//! A thin wrapper over `reqwest` that signs and dispatches one API call at a
//! time. Non-success statuses surface as [`Error::HttpStatus`] and are never
//! retried here; pagination and retry policy live with the caller.

use crate::auth::{WsseSigner, WSSE_HEADER};
use crate::config::Credentials;
use crate::error::{Error, Result};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default reporting API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.omniture.com/admin/1.4/rest/";

/// Configuration for the transport session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the reporting API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("omniture-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SessionConfig {
    /// Create a new config builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for session config
#[derive(Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

/// Authenticated transport session
pub struct Session {
    client: Client,
    config: SessionConfig,
    signer: WsseSigner,
}

impl Session {
    /// Create a session for the given credentials with default configuration
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_config(credentials, SessionConfig::default())
    }

    /// Create a session with custom configuration
    pub fn with_config(credentials: &Credentials, config: SessionConfig) -> Result<Self> {
        credentials.validate()?;

        // Reject a bad base URL at construction, not on first call
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config,
            signer: WsseSigner::new(credentials),
        })
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Dispatch one API call and decode its JSON body.
    ///
    /// The API method name travels as the `method` query parameter and the
    /// parameter mapping as the JSON body, per the reporting API's wire
    /// convention.
    pub async fn request(&self, method: Method, endpoint: &str, body: &Value) -> Result<Value> {
        let url = self.build_url(endpoint)?;

        let mut req = self.client.request(method.clone(), url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        req = req.header(WSSE_HEADER, self.signer.header_value());
        req = req.json(body);

        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("{method} {endpoint} -> {}", status.as_u16());
        response.json().await.map_err(Error::Http)
    }

    fn build_url(&self, endpoint: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.query_pairs_mut().append_pair("method", endpoint);
        Ok(url)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
