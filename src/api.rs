//! API handle and default-API registry
//!
//! An [`Api`] wraps a transport [`Session`]. Explicit handles are the primary
//! path; `init`/`from_json`/`from_env` additionally register the new handle
//! in a process-wide default slot for call-site parity with clients that
//! construct requests without wiring a handle through.

use crate::config::Credentials;
use crate::error::Result;
use crate::session::{Session, SessionConfig};
use once_cell::sync::Lazy;
use reqwest::Method;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Process-wide default API slot.
///
/// A single mutable slot with last-write-wins semantics and no cross-thread
/// coordination guarantee; callers needing isolation pass explicit handles.
static DEFAULT_API: Lazy<RwLock<Option<Arc<Api>>>> = Lazy::new(|| RwLock::new(None));

/// Handle to the reporting API
#[derive(Debug)]
pub struct Api {
    session: Session,
}

impl Api {
    /// Wrap an existing session without touching the default registry
    pub fn new(session: Session) -> Arc<Self> {
        Arc::new(Self { session })
    }

    /// Build a handle from credentials and register it as the default
    pub fn init(credentials: &Credentials, config: SessionConfig) -> Result<Arc<Self>> {
        let session = Session::with_config(credentials, config)?;
        let api = Self::new(session);
        Self::set_default(&api);
        Ok(api)
    }

    /// Load credentials from a JSON file and register the handle as the
    /// default
    pub fn from_json(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let credentials = Credentials::from_json_file(path)?;
        Self::init(&credentials, SessionConfig::default())
    }

    /// Load credentials from the environment and register the handle as the
    /// default
    pub fn from_env() -> Result<Arc<Self>> {
        let credentials = Credentials::from_env()?;
        Self::init(&credentials, SessionConfig::default())
    }

    /// Replace the process-wide default handle (last write wins)
    pub fn set_default(api: &Arc<Self>) {
        *DEFAULT_API.write().expect("default-API lock poisoned") = Some(Arc::clone(api));
    }

    /// The process-wide default handle, if one has been registered
    pub fn default_api() -> Option<Arc<Self>> {
        DEFAULT_API.read().expect("default-API lock poisoned").clone()
    }

    /// The underlying transport session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Perform one API call with the given parameter mapping
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        self.session
            .request(method, endpoint, &Value::Object(params.clone()))
            .await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Handle pointing at a closed port; for tests that never dispatch
    pub(crate) fn unconnected_api() -> Arc<Api> {
        let config = SessionConfig::builder()
            .base_url("http://127.0.0.1:9/rest/")
            .build();
        let session =
            Session::with_config(&Credentials::new("acme", "alice", "s3cr3t"), config).unwrap();
        Api::new(session)
    }
}
