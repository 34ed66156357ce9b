//! Integration tests for the backend client using WireMock
//!
//! These tests mock the order-management backend to verify request shape,
//! reply parsing and the failure modes the relay collapses into one error.

use std::time::Duration;

use domain::{RelayRequest, SenderId};
use integration_backend::{BackendClient, BackendClientConfig, BackendError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test client configured to use the mock server
fn create_test_client(mock_server: &MockServer) -> BackendClient {
    let config = BackendClientConfig {
        base_url: mock_server.uri(),
        timeout_secs: 1,
        connect_timeout_secs: 1,
    };
    #[allow(clippy::expect_used)]
    BackendClient::new(config).expect("Failed to create client")
}

fn request(body: &str) -> RelayRequest {
    RelayRequest {
        from: SenderId::new("111@c.us").unwrap(),
        body: body.to_string(),
        has_media: false,
    }
}

// =============================================================================
// whatsapp_in
// =============================================================================

#[tokio::test]
async fn posts_exact_payload_and_returns_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "from": "111@c.us",
            "body": "/pending",
            "hasMedia": false
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"reply": "No pending orders"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.whatsapp_in(&request("/pending")).await.unwrap();

    assert_eq!(response.reply_text(), Some("No pending orders"));
}

#[tokio::test]
async fn body_is_forwarded_untrimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .and(body_json(serde_json::json!({
            "from": "111@c.us",
            "body": "  Client Name: John Doe\n",
            "hasMedia": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .whatsapp_in(&request("  Client Name: John Doe\n"))
        .await
        .unwrap();

    assert_eq!(response.reply_text(), None);
}

#[tokio::test]
async fn empty_reply_is_not_relayable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"reply": ""})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.whatsapp_in(&request("/all")).await.unwrap();

    assert_eq!(response.reply_text(), None);
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.whatsapp_in(&request("/pending")).await;

    match result {
        Err(BackendError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        },
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_is_an_error() {
    let mock_server = MockServer::start().await;

    let client = create_test_client(&mock_server);
    let result = client.whatsapp_in(&request("/pending")).await;

    assert!(matches!(
        result,
        Err(BackendError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn malformed_json_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.whatsapp_in(&request("/pending")).await;

    assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
}

#[tokio::test]
async fn non_string_reply_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"reply": 7})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.whatsapp_in(&request("/pending")).await;

    assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/whatsapp_in"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"reply": "too late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.whatsapp_in(&request("/pending")).await;

    assert!(matches!(result, Err(BackendError::Timeout(_))));
}

#[tokio::test]
async fn unreachable_backend_is_connection_failure() {
    // Reserve a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = BackendClient::new(BackendClientConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout_secs: 1,
        connect_timeout_secs: 1,
    })
    .unwrap();
    let result = client.whatsapp_in(&request("/pending")).await;

    assert!(
        matches!(
            result,
            Err(BackendError::ConnectionFailed(_) | BackendError::Timeout(_))
        ),
        "unexpected result: {result:?}"
    );
}

// =============================================================================
// health
// =============================================================================

#[tokio::test]
async fn health_check_passes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "message": "WhatsApp Glass Bot Backend is running"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let health = client.health().await.unwrap();

    assert_eq!(health.status, "healthy");
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn health_check_fails_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(!client.is_healthy().await);
}

#[tokio::test]
async fn health_check_fails_when_backend_reports_unhealthy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "unhealthy"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let health = client.health().await.unwrap();

    assert!(!health.is_healthy());
    assert!(!client.is_healthy().await);
}
