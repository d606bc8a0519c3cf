//! WSSE request signing
//!
//! Every request carries a fresh `X-WSSE` UsernameToken header. The password
//! digest is `base64(sha256(nonce + created + secret))` over the raw nonce
//! bytes, the creation timestamp and the shared secret.

use crate::config::Credentials;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Header name carrying the signature
pub const WSSE_HEADER: &str = "X-WSSE";

/// Signs outgoing requests with a WSSE UsernameToken
#[derive(Debug, Clone)]
pub struct WsseSigner {
    username: String,
    secret: String,
}

impl WsseSigner {
    /// Create a signer from credentials
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            username: credentials.qualified_username(),
            secret: credentials.secret.clone(),
        }
    }

    /// Produce a fresh header value with a random nonce and the current time
    pub fn header_value(&self) -> String {
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);
        self.header_value_at(&nonce, Utc::now())
    }

    /// Produce a header value for a given nonce and timestamp
    pub(crate) fn header_value_at(&self, nonce: &[u8], created: DateTime<Utc>) -> String {
        let created = created.to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(created.as_bytes());
        hasher.update(self.secret.as_bytes());
        let digest = BASE64.encode(hasher.finalize());

        format!(
            "UsernameToken Username=\"{}\", PasswordDigest=\"{}\", Nonce=\"{}\", Created=\"{}\"",
            self.username,
            digest,
            BASE64.encode(nonce),
            created
        )
    }
}

#[cfg(test)]
mod tests;
