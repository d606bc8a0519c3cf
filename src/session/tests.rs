//! Tests for the transport session

use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::new("acme", "alice", "s3cr3t")
}

fn session_for(server: &MockServer) -> Session {
    let config = SessionConfig::builder()
        .base_url(format!("{}/rest/", server.uri()))
        .build();
    Session::with_config(&credentials(), config).unwrap()
}

#[test]
fn test_session_config_default() {
    let config = SessionConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("omniture-client/"));
}

#[test]
fn test_session_config_builder() {
    let config = SessionConfig::builder()
        .base_url("https://example.com/rest/")
        .timeout(Duration::from_secs(5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://example.com/rest/");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_session_rejects_invalid_base_url() {
    let config = SessionConfig::builder().base_url("not a url").build();
    let err = Session::with_config(&credentials(), config).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[test]
fn test_session_rejects_empty_credentials() {
    let err = Session::new(&Credentials::new("acme", "alice", "")).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[tokio::test]
async fn test_request_sends_method_param_body_and_signature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/"))
        .and(query_param("method", "Report.Get"))
        .and(body_json(json!({"reportSuiteID": "suite-1"})))
        .and(header_exists("X-WSSE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let body = json!({"reportSuiteID": "suite-1"});
    let response = session
        .request(Method::GET, "Report.Get", &body)
        .await
        .unwrap();

    assert_eq!(response, json!({"page": 1}));
}

#[tokio::test]
async fn test_request_sends_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/"))
        .and(wiremock::matchers::header("X-Trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = SessionConfig::builder()
        .base_url(format!("{}/rest/", server.uri()))
        .header("X-Trace", "abc")
        .build();
    let session = Session::with_config(&credentials(), config).unwrap();

    session
        .request(Method::POST, "Company.GetEndpoint", &json!({}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_request_maps_non_success_to_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad Request: authentication"))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = session
        .request(Method::GET, "Report.Get", &json!({}))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("authentication"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}
