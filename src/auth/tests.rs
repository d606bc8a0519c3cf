//! Tests for WSSE signing

use super::*;
use chrono::TimeZone;

fn signer() -> WsseSigner {
    WsseSigner::new(&Credentials::new("acme", "alice", "s3cr3t"))
}

#[test]
fn test_header_shape() {
    let header = signer().header_value();
    assert!(header.starts_with("UsernameToken "));
    assert!(header.contains("Username=\"alice:acme\""));
    assert!(header.contains("PasswordDigest=\""));
    assert!(header.contains("Nonce=\""));
    assert!(header.contains("Created=\""));
}

#[test]
fn test_header_deterministic_for_fixed_inputs() {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let nonce = [7u8; 16];

    let a = signer().header_value_at(&nonce, created);
    let b = signer().header_value_at(&nonce, created);
    assert_eq!(a, b);
    assert!(a.contains("Created=\"2024-03-01T12:00:00Z\""));
}

#[test]
fn test_digest_depends_on_secret() {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let nonce = [7u8; 16];

    let a = signer().header_value_at(&nonce, created);
    let other = WsseSigner::new(&Credentials::new("acme", "alice", "different"));
    let b = other.header_value_at(&nonce, created);
    assert_ne!(a, b);
}

#[test]
fn test_fresh_nonce_per_header() {
    let s = signer();
    // Random 16-byte nonces never collide in practice
    assert_ne!(s.header_value(), s.header_value());
}
