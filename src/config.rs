//! Credentials and client configuration
//!
//! Credentials can be supplied directly, loaded from a JSON file with the
//! top-level keys `company`, `username` and `secret`, or picked up from the
//! environment. Load failures are fatal at construction time.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the company name
pub const ENV_COMPANY: &str = "OMNITURE_COMPANY";
/// Environment variable holding the username
pub const ENV_USERNAME: &str = "OMNITURE_USERNAME";
/// Environment variable holding the shared secret
pub const ENV_SECRET: &str = "OMNITURE_SECRET";

/// API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Company (report suite owner) name
    pub company: String,
    /// API username
    pub username: String,
    /// Shared secret used for request signing
    pub secret: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(
        company: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Load credentials from a JSON file with keys `company`, `username`,
    /// `secret`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let credentials: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::config(format!("invalid credential file {}: {e}", path.display()))
        })?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Load credentials from `OMNITURE_COMPANY`, `OMNITURE_USERNAME` and
    /// `OMNITURE_SECRET`
    pub fn from_env() -> Result<Self> {
        let read = |var: &str| {
            std::env::var(var).map_err(|_| Error::missing_field(var.to_ascii_lowercase()))
        };
        let credentials = Self {
            company: read(ENV_COMPANY)?,
            username: read(ENV_USERNAME)?,
            secret: read(ENV_SECRET)?,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Ensure all required fields are present and non-empty
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("company", &self.company),
            ("username", &self.username),
            ("secret", &self.secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }
        Ok(())
    }

    /// Fully qualified signing username, `username:company`
    pub fn qualified_username(&self) -> String {
        format!("{}:{}", self.username, self.company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_credentials_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"company": "acme", "username": "alice", "secret": "s3cr3t"}}"#
        )
        .unwrap();

        let credentials = Credentials::from_json_file(file.path()).unwrap();
        assert_eq!(credentials.company, "acme");
        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.secret, "s3cr3t");
        assert_eq!(credentials.qualified_username(), "alice:acme");
    }

    #[test]
    fn test_credentials_file_missing() {
        let err = Credentials::from_json_file("/nonexistent/creds.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_credentials_file_missing_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"company": "acme", "username": "alice"}}"#).unwrap();

        let err = Credentials::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn test_credentials_validate_rejects_empty() {
        let credentials = Credentials::new("acme", "", "s3cr3t");
        let err = credentials.validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "username"));
    }
}
