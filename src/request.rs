//! Request builder
//!
//! Assembles a logical API request and dispatches it: retrieval (`GET`) goes
//! through a [`Cursor`] so multi-page results come back merged, every other
//! method performs a single direct call and returns the decoded body
//! unmodified.

use crate::api::Api;
use crate::cursor::{Cursor, Params};
use crate::error::{Error, Result};
use crate::types::ApiType;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Builder for one logical API request
#[derive(Debug)]
pub struct RequestBuilder {
    api: Arc<Api>,
    method: Method,
    endpoint: String,
    api_type: ApiType,
    params: Params,
}

impl RequestBuilder {
    /// Create a builder against the process-wide default API.
    ///
    /// Fails with [`Error::NoDefaultApi`] when nothing has been registered;
    /// callers needing isolation should pass an explicit handle via
    /// [`RequestBuilder::with_api`].
    pub fn new(method: Method) -> Result<Self> {
        let api = Api::default_api().ok_or(Error::NoDefaultApi)?;
        Ok(Self::with_api(api, method))
    }

    /// Create a builder against an explicit API handle
    pub fn with_api(api: Arc<Api>, method: Method) -> Self {
        Self {
            api,
            method,
            endpoint: String::new(),
            api_type: ApiType::default(),
            params: Params::new(),
        }
    }

    /// Set the API method name, e.g. `Report.Get`
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Select the pagination convention
    #[must_use]
    pub fn api_type(mut self, api_type: ApiType) -> Self {
        self.api_type = api_type;
        self
    }

    /// Select the pagination convention from its case-insensitive tag
    pub fn api_type_str(mut self, tag: &str) -> Result<Self> {
        self.api_type = tag.parse()?;
        Ok(self)
    }

    /// Add one request parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge a parameter mapping into the request
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Dispatch the request.
    ///
    /// `GET` drains a cursor and returns the merged aggregate result; any
    /// other method returns the decoded response body as-is, with no
    /// pagination, merge or cleanup.
    pub async fn execute(self) -> Result<Value> {
        let Self {
            api,
            method,
            endpoint,
            api_type,
            params,
        } = self;

        if method == Method::GET {
            let cursor = Cursor::new(api, endpoint, api_type, params);
            let merged = cursor.execute().await?;
            Ok(Value::Object(merged))
        } else {
            api.call(method, &endpoint, &params).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_accumulates_params() {
        let api = crate::api::test_support::unconnected_api();
        let builder = RequestBuilder::with_api(api, Method::GET)
            .endpoint("Report.Get")
            .api_type(ApiType::Bulk)
            .param("reportSuiteID", "suite-1")
            .param("limit", 100);

        assert_eq!(builder.endpoint, "Report.Get");
        assert_eq!(builder.api_type, ApiType::Bulk);
        assert_eq!(builder.params.get("reportSuiteID"), Some(&json!("suite-1")));
        assert_eq!(builder.params.get("limit"), Some(&json!(100)));
    }

    #[test]
    fn test_builder_parses_api_type_tag() {
        let api = crate::api::test_support::unconnected_api();
        let builder = RequestBuilder::with_api(api, Method::GET)
            .api_type_str("bulk")
            .unwrap();
        assert_eq!(builder.api_type, ApiType::Bulk);

        let api = crate::api::test_support::unconnected_api();
        let err = RequestBuilder::with_api(api, Method::GET)
            .api_type_str("SOAP")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidApiType { .. }));
    }

    #[test]
    fn test_builder_merges_param_mapping() {
        let mut extra = Params::new();
        extra.insert("dateFrom".to_string(), json!("2024-01-01"));
        extra.insert("dateTo".to_string(), json!("2024-01-31"));

        let api = crate::api::test_support::unconnected_api();
        let builder = RequestBuilder::with_api(api, Method::POST)
            .param("reportSuiteID", "suite-1")
            .params(extra);

        assert_eq!(builder.params.len(), 3);
        assert_eq!(builder.params.get("dateFrom"), Some(&json!("2024-01-01")));
    }
}
