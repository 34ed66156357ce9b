//! Integration tests for WhatsApp client using WireMock
//!
//! These tests mock the Meta Graph API to verify client behavior without
//! making actual API calls.

use integration_whatsapp::{
    WebhookPayload, WhatsAppClient, WhatsAppClientConfig, WhatsAppError, extract_inbound_messages,
    normalize_recipient,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(base_url: &str) -> WhatsAppClientConfig {
    WhatsAppClientConfig {
        access_token: "test_access_token".to_string(),
        phone_number_id: "123456789".to_string(),
        app_secret: "test_app_secret".to_string(),
        verify_token: "test_verify_token".to_string(),
        signature_required: false,
        api_version: "v18.0".to_string(),
        graph_base_url: base_url.to_string(),
        whitelist: Vec::new(),
    }
}

fn create_test_client(mock_server: &MockServer) -> WhatsAppClient {
    #[allow(clippy::expect_used)]
    WhatsAppClient::new(test_config(&mock_server.uri())).expect("Failed to create client")
}

/// Sample success response for send_text
fn send_message_success_response() -> serde_json::Value {
    serde_json::json!({
        "messaging_product": "whatsapp",
        "contacts": [{
            "input": "491234567890",
            "wa_id": "491234567890"
        }],
        "messages": [{
            "id": "wamid.HBgNNDkxMjM0NTY3ODkwFQIAERgSMEQ3RkE2NTYxQTY5MTlBMjJBAA=="
        }]
    })
}

/// Sample API error response
fn api_error_response(code: i32, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "type": "OAuthException",
            "fbtrace_id": "AbcDefGhiJkL"
        }
    })
}

// =============================================================================
// Send Message Tests
// =============================================================================

mod send_text_tests {
    use super::*;

    #[tokio::test]
    async fn sends_text_with_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v18.0/123456789/messages"))
            .and(header("authorization", "Bearer test_access_token"))
            .and(body_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "491234567890",
                "type": "text",
                "text": {"body": "No pending orders"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(send_message_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let response = client
            .send_text("491234567890@c.us", "No pending orders")
            .await
            .unwrap();

        assert_eq!(response.messaging_product, "whatsapp");
        assert!(response.message_id().unwrap().starts_with("wamid."));
        assert_eq!(response.contacts[0].wa_id, "491234567890");
    }

    #[tokio::test]
    async fn multiline_body_is_sent_verbatim() {
        let mock_server = MockServer::start().await;
        let body = "Line one\n  Line two  \n";

        Mock::given(method("POST"))
            .and(path("/v18.0/123456789/messages"))
            .and(body_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "491234567890",
                "type": "text",
                "text": {"body": body}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(send_message_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.send_text("+491234567890", body).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_recipient_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(send_message_success_response()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_text("+123", "Hello").await;
        assert!(matches!(result, Err(WhatsAppError::InvalidRecipient(_))));
    }

    #[tokio::test]
    async fn invalid_token_error_code_190() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v18.0/123456789/messages"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(api_error_response(190, "Invalid OAuth access token")),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_text("491234567890", "Hello").await;

        match result {
            Err(WhatsAppError::Api { code, message }) => {
                assert_eq!(code, 190);
                assert!(message.contains("OAuth"));
            },
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limit_error_code_4() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v18.0/123456789/messages"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(api_error_response(4, "Application request limit reached")),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_text("491234567890", "Hello").await;

        assert!(matches!(result, Err(WhatsAppError::Api { code: 4, .. })));
    }

    #[tokio::test]
    async fn non_json_error_uses_http_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v18.0/123456789/messages"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_text("491234567890", "Hello").await;

        match result {
            Err(WhatsAppError::Api { code, message }) => {
                assert_eq!(code, 502);
                assert_eq!(message, "Bad Gateway");
            },
            other => panic!("expected API error, got {other:?}"),
        }
    }
}

// =============================================================================
// Availability Tests
// =============================================================================

mod availability_tests {
    use super::*;

    #[tokio::test]
    async fn available_when_profile_readable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v18.0/123456789/whatsapp_business_profile"))
            .and(query_param("fields", "about"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": [{}]})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.is_available().await);
    }

    #[tokio::test]
    async fn unavailable_on_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v18.0/123456789/whatsapp_business_profile"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(api_error_response(190, "expired")),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(!client.is_available().await);
    }
}

// =============================================================================
// Webhook Tests
// =============================================================================

mod webhook_tests {
    use super::*;

    #[test]
    fn parse_full_delivery() {
        let json = serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550001111",
                            "phone_number_id": "123456789"
                        },
                        "contacts": [{"profile": {"name": "Jane"}, "wa_id": "491234567890"}],
                        "messages": [
                            {
                                "from": "491234567890",
                                "id": "wamid.a",
                                "timestamp": "1700000000",
                                "type": "text",
                                "text": {"body": "/pending"}
                            },
                            {
                                "from": "491234567890",
                                "id": "wamid.b",
                                "timestamp": "1700000001",
                                "type": "document",
                                "document": {"id": "m1", "mime_type": "application/pdf", "filename": "order.pdf"}
                            }
                        ]
                    }
                }]
            }]
        });

        let payload: WebhookPayload = serde_json::from_value(json).unwrap();
        let messages = extract_inbound_messages(&payload);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "/pending");
        assert!(!messages[0].has_attachment);
        assert!(messages[1].has_attachment);
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_numbers_survive_every_id_form(digits in "[0-9]{7,15}") {
            for form in [
                digits.clone(),
                format!("+{digits}"),
                format!("{digits}@c.us"),
                format!("{digits}@s.whatsapp.net"),
            ] {
                prop_assert_eq!(normalize_recipient(&form).unwrap(), digits.clone());
            }
        }

        #[test]
        fn short_numbers_are_rejected(digits in "[0-9]{0,6}") {
            prop_assert!(normalize_recipient(&digits).is_err());
        }

        #[test]
        fn long_numbers_are_rejected(digits in "[0-9]{16,24}") {
            prop_assert!(normalize_recipient(&digits).is_err());
        }

        #[test]
        fn normalized_output_is_digits_only(input in "\\PC{0,24}") {
            if let Ok(digits) = normalize_recipient(&input) {
                prop_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
            }
        }
    }
}
