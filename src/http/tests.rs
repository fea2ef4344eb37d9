//! Tests for the HTTP transport module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    let config = HttpClientConfig::builder().no_rate_limit().build();
    ReqwestTransport::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("pagewalk/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(5, 5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 5)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_options_merge() {
    let base = RequestOptions::new()
        .header("PRIVATE-TOKEN", "base")
        .header("Accept", "application/json");
    let extra = RequestOptions::new()
        .header("PRIVATE-TOKEN", "override")
        .timeout(Duration::from_secs(5));

    let merged = base.clone().merge(extra);
    assert_eq!(
        merged.headers.get("PRIVATE-TOKEN"),
        Some(&"override".to_string())
    );
    assert_eq!(
        merged.headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(merged.timeout, Some(Duration::from_secs(5)));

    // Merging nothing leaves the base untouched
    assert_eq!(base.clone().merge(RequestOptions::new()), base);
}

#[test]
fn test_transport_with_rate_limit() {
    let config = HttpClientConfig::builder()
        .rate_limit(RateLimiterConfig::default())
        .build();
    assert!(ReqwestTransport::with_config(config).unwrap().has_rate_limiter());
    assert!(!transport().has_rate_limiter());
}

#[tokio::test]
async fn test_transport_returns_status_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/groups"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(serde_json::json!([{"id": 1}])),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/api/v4/groups?per_page=100", mock_server.uri());
    let response = transport().send(&url, &RequestOptions::new()).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.header("x-next-page"), Some("2"));

    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body[0]["id"], 1);
}

#[tokio::test]
async fn test_transport_sends_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secure"))
        .and(header("X-Default", "d"))
        .and(header("PRIVATE-TOKEN", "secret123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-Default", "d")
        .no_rate_limit()
        .build();
    let transport = ReqwestTransport::with_config(config).unwrap();

    let response = transport
        .send(
            &format!("{}/api/secure", mock_server.uri()),
            &RequestOptions::new().header("PRIVATE-TOKEN", "secret123"),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_transport_does_not_retry_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/api/flaky", mock_server.uri());
    let response = transport().send(&url, &RequestOptions::new()).await.unwrap();

    assert_eq!(response.status, 500);
    assert!(!response.is_success());

    let err = response.error_for_status(&url).unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, ref body, .. } if body == "oops"));
}

#[tokio::test]
async fn test_transport_connection_error() {
    // Nothing listens on port 9 locally
    let result = transport()
        .send("http://127.0.0.1:9/unreachable", &RequestOptions::new())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_transport_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let response = transport()
        .send(&format!("{}/api/broken", mock_server.uri()), &RequestOptions::new())
        .await
        .unwrap();

    let result: crate::error::Result<serde_json::Value> = response.json();
    assert!(matches!(result, Err(Error::Decode { .. })));
}
