//! Common types and pagination constants

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Results per page served by the REST variant.
///
/// Fixed server-side; used to derive the total page count from the
/// reported result total.
pub const REST_PAGE_SIZE: u64 = 1_000;

/// Default `limit` parameter for the BULK variant.
pub const BULK_DEFAULT_LIMIT: u64 = 50_000;

/// Default `offset` parameter for the BULK variant.
pub const BULK_DEFAULT_OFFSET: u64 = 0;

/// API variant selecting the pagination convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiType {
    /// Page-number pagination (`page`, `pageSize`, `total`/`totalResults`)
    #[default]
    Rest,
    /// Offset/limit pagination (`offset`, `limit`, `hasMore`)
    Bulk,
}

impl ApiType {
    /// Response key under which `execute()` collects the merged elements
    pub fn output_key(self) -> &'static str {
        match self {
            Self::Rest => "elements",
            Self::Bulk => "items",
        }
    }
}

impl FromStr for ApiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "REST" => Ok(Self::Rest),
            "BULK" => Ok(Self::Bulk),
            _ => Err(Error::invalid_api_type(s)),
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "REST"),
            Self::Bulk => write!(f, "BULK"),
        }
    }
}
