//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::{BackoffType, Method};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(max_retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .max_retries(max_retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(5),
        )
        .build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff_type, BackoffType::Exponential);
    assert!(config.user_agent.starts_with("tableau-server-client/"));
    assert!(!config.accept_invalid_certs);
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_keeps_query_order() {
    let config = RequestConfig::new()
        .query("pageNumber", "1")
        .query_params(vec![
            ("pageSize".to_string(), "10".to_string()),
            ("filter".to_string(), "name:eq:a".to_string()),
        ])
        .header("X-Request-Id", "abc123")
        .xml("<tsRequest/>".to_string())
        .auth_token(Some("tok".into()))
        .timeout(Duration::from_secs(10))
        .retries(2);

    let keys: Vec<&str> = config.query.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["pageNumber", "pageSize", "filter"]);
    assert_eq!(config.body.as_deref(), Some("<tsRequest/>"));
    assert_eq!(config.auth_token.as_deref(), Some("tok"));
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[test_case(BackoffType::Constant, 3, 100 ; "constant")]
#[test_case(BackoffType::Linear, 2, 300 ; "linear")]
#[test_case(BackoffType::Exponential, 3, 800 ; "exponential")]
#[test_case(BackoffType::Exponential, 20, 1000 ; "capped at max")]
fn test_calculate_backoff(backoff_type: BackoffType, attempt: u32, expected_ms: u64) {
    let config = HttpClientConfig::builder()
        .backoff(
            backoff_type,
            Duration::from_millis(100),
            Duration::from_secs(1),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert_eq!(
        client.calculate_backoff(attempt),
        Duration::from_millis(expected_ms)
    );
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_sends_auth_header_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3.19/sites/s1/users"))
        .and(header(AUTH_HEADER, "tok-1"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<tsResponse/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(0);
    let url = format!("{}/api/3.19/sites/s1/users", mock_server.uri());
    let body = client
        .get(
            &url,
            RequestConfig::new()
                .query("pageSize", "2")
                .auth_token(Some("tok-1".into())),
        )
        .await
        .unwrap();

    assert_eq!(body, "<tsResponse/>");
}

#[tokio::test]
async fn test_post_sends_xml_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/2.4/auth/signin"))
        .and(header("content-type", "text/xml"))
        .and(body_string("<tsRequest/>"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(0);
    let url = format!("{}/api/2.4/auth/signin", mock_server.uri());
    let body = client
        .request(
            Method::POST,
            &url,
            RequestConfig::new().xml("<tsRequest/>".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(body, "<ok/>");
}

#[tokio::test]
async fn test_xml_error_becomes_server_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"<tsResponse xmlns="http://tableau.com/api"><error code="404002"><summary>Not Found</summary><detail>No such user</detail></error></tsResponse>"#,
        ))
        .mount(&mock_server)
        .await;

    let client = fast_client(0);
    let err = client
        .get(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::ServerResponse {
            status,
            code,
            summary,
            detail,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, "404002");
            assert_eq!(summary, "Not Found");
            assert_eq!(detail, "No such user");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_html_error_becomes_non_xml_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html><body>wrong site"))
        .mount(&mock_server)
        .await;

    let client = fast_client(0);
    let err = client
        .get(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NonXmlResponse { status: 404, .. }));
}

#[tokio::test]
async fn test_retries_server_errors_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .mount(&mock_server)
        .await;

    let client = fast_client(3);
    let body = client
        .get(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(body, "<ok/>");
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(2);
    let err = client
        .get(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NonXmlResponse { status: 500, .. }));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(3);
    let result = client.delete(&mock_server.uri(), RequestConfig::new()).await;
    assert!(result.is_err());
}
