//! WhatsApp client for sending messages
//!
//! Uses the Meta Graph API to send WhatsApp text messages.

use std::{fmt, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Shortest recipient number accepted, in digits
const MIN_RECIPIENT_DIGITS: usize = 7;

/// Longest recipient number accepted, in digits (E.164 limit)
const MAX_RECIPIENT_DIGITS: usize = 15;

/// JID suffixes a recipient id may carry
const JID_SUFFIXES: [&str; 2] = ["@c.us", "@s.whatsapp.net"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: i32, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Invalid signature")]
    InvalidSignature,
}

/// WhatsApp client configuration
#[derive(Clone)]
pub struct WhatsAppClientConfig {
    /// Meta Graph API access token
    pub access_token: String,
    /// Phone number ID from WhatsApp Business
    pub phone_number_id: String,
    /// App secret for webhook signature verification
    pub app_secret: String,
    /// Verify token for webhook setup
    pub verify_token: String,
    /// Whether signature verification is required
    pub signature_required: bool,
    /// API version (default: v18.0)
    pub api_version: String,
    /// Graph API root (default: <https://graph.facebook.com>)
    pub graph_base_url: String,
    /// Senders allowed to talk to the bot; empty allows everyone
    pub whitelist: Vec<String>,
}

impl fmt::Debug for WhatsAppClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppClientConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("app_secret", &"[REDACTED]")
            .field("verify_token", &"[REDACTED]")
            .field("signature_required", &self.signature_required)
            .field("api_version", &self.api_version)
            .field("graph_base_url", &self.graph_base_url)
            .field("whitelist", &self.whitelist)
            .finish()
    }
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            app_secret: String::new(),
            verify_token: String::new(),
            signature_required: true,
            api_version: "v18.0".to_string(),
            graph_base_url: "https://graph.facebook.com".to_string(),
            whitelist: Vec::new(),
        }
    }
}

/// WhatsApp client for the Meta Graph API
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    client: Client,
    config: WhatsAppClientConfig,
    base_url: String,
    whitelist: Vec<String>,
}

/// Message send request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: String,
    #[serde(rename = "type")]
    msg_type: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    body: &'a str,
}

/// API response for sent message
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub messaging_product: String,
    #[serde(default)]
    pub contacts: Vec<ContactInfo>,
    #[serde(default)]
    pub messages: Vec<MessageInfo>,
}

impl SendMessageResponse {
    /// Id of the first accepted message
    pub fn message_id(&self) -> Option<&str> {
        self.messages.first().map(|m| m.id.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactInfo {
    pub input: String,
    pub wa_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageInfo {
    pub id: String,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i32,
    message: String,
}

/// Reduce a recipient id to the bare digits the Graph API expects
///
/// Accepts `491234567890`, `+491234567890`, `491234567890@c.us` and
/// `491234567890@s.whatsapp.net`.
pub fn normalize_recipient(recipient: &str) -> Result<String, WhatsAppError> {
    let trimmed = recipient.trim();
    let user = JID_SUFFIXES
        .iter()
        .find_map(|suffix| trimmed.strip_suffix(suffix))
        .unwrap_or(trimmed);
    let digits = user.strip_prefix('+').unwrap_or(user);

    let valid = (MIN_RECIPIENT_DIGITS..=MAX_RECIPIENT_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit());

    if valid {
        Ok(digits.to_string())
    } else {
        Err(WhatsAppError::InvalidRecipient(recipient.to_string()))
    }
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.phone_number_id.is_empty() {
            return Err(WhatsAppError::Configuration(
                "phone_number_id is required".to_string(),
            ));
        }

        let base_url = format!(
            "{}/{}/{}",
            config.graph_base_url.trim_end_matches('/'),
            config.api_version,
            config.phone_number_id
        );

        let whitelist = config
            .whitelist
            .iter()
            .filter_map(|entry| match normalize_recipient(entry) {
                Ok(digits) => Some(digits),
                Err(_) => {
                    warn!(entry = %entry, "Ignoring malformed whitelist entry");
                    None
                },
            })
            .collect();

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            config,
            base_url,
            whitelist,
        })
    }

    /// Send a text message
    #[instrument(skip(self, message), fields(to = %to))]
    pub async fn send_text(
        &self,
        to: &str,
        message: &str,
    ) -> Result<SendMessageResponse, WhatsAppError> {
        let phone = normalize_recipient(to)?;

        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to: phone,
            msg_type: "text",
            text: TextContent { body: message },
        };

        debug!(message_len = message.len(), "Sending WhatsApp message");

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(error) => Err(WhatsAppError::Api {
                code: error.error.code,
                message: error.error.message,
            }),
            Err(_) => Err(WhatsAppError::Api {
                code: i32::from(status.as_u16()),
                message: body,
            }),
        }
    }

    /// Check if a sender may talk to the bot
    ///
    /// Compares bare digits, so `+4912345678` in the whitelist matches a
    /// sender reported as `4912345678@c.us`.
    pub fn is_whitelisted(&self, sender: &str) -> bool {
        if self.config.whitelist.is_empty() {
            return true;
        }
        normalize_recipient(sender).is_ok_and(|digits| self.whitelist.contains(&digits))
    }

    /// Verify the `X-Hub-Signature-256` header of a webhook delivery
    pub fn verify_signature(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<(), WhatsAppError> {
        if !self.config.signature_required {
            return Ok(());
        }

        if self.config.app_secret.is_empty() {
            return Err(WhatsAppError::Configuration(
                "app_secret is required when signature_required is set".to_string(),
            ));
        }

        let signature = signature.ok_or(WhatsAppError::InvalidSignature)?;
        if crate::webhook::verify_signature(payload, signature, &self.config.app_secret) {
            Ok(())
        } else {
            Err(WhatsAppError::InvalidSignature)
        }
    }

    /// Get the verify token for webhook setup
    #[must_use]
    pub fn verify_token(&self) -> &str {
        &self.config.verify_token
    }

    /// Check if the WhatsApp API is reachable
    ///
    /// Reads the business profile, which validates token and phone number
    /// id without sending anything.
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/whatsapp_business_profile", self.base_url))
            .bearer_auth(&self.config.access_token)
            .query(&[("fields", "about")])
            .send()
            .await
            .is_ok_and(|res| res.status().is_success())
    }
}
