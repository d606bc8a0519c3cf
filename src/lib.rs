//! # Omniture Client
//!
//! A client library for the Omniture-style web analytics reporting API.
//! Authenticates a session, issues HTTP calls, and exposes a paginating
//! cursor that transparently walks multi-page result sets for both the
//! standard ("REST") and bulk-export ("BULK") API variants.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use omniture_client::{Api, ApiType, RequestBuilder, Result};
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load credentials and register the handle as the process default
//!     let api = Api::from_json("credentials.json")?;
//!
//!     // GET requests paginate transparently; all pages are merged into
//!     // one aggregate response
//!     let report = RequestBuilder::with_api(api, Method::GET)
//!         .endpoint("Report.Get")
//!         .api_type(ApiType::Rest)
//!         .param("reportSuiteID", "my-suite")
//!         .execute()
//!         .await?;
//!
//!     println!("{} elements", report["elements"].as_array().unwrap().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RequestBuilder ──GET──▶ Cursor ──load()──▶ Api ──▶ Session ──▶ HTTP
//!       │                   │
//!       └──other methods────┴──▶ merged aggregate result
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

/// Error types for the client
pub mod error;

/// Common types and pagination constants
pub mod types;

/// Credentials and client configuration
pub mod config;

/// WSSE request signing
pub mod auth;

/// Transport session over HTTP
pub mod session;

/// Pagination cursor and page transition logic
pub mod cursor;

/// Request builder
pub mod request;

/// API handle and default-API registry
pub mod api;

pub use api::Api;
pub use config::Credentials;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use request::RequestBuilder;
pub use session::{Session, SessionConfig};
pub use types::ApiType;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
