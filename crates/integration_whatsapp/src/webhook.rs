//! WhatsApp webhook handler
//!
//! Parses webhook deliveries from the WhatsApp Business API and turns each
//! delivered message into an [`InboundMessage`].

use domain::{InboundMessage, MessageKind, SenderId};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// WhatsApp webhook entry
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEntry {
    pub id: String,
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookChange {
    pub value: WebhookValue,
    pub field: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookValue {
    pub messaging_product: String,
    #[serde(default)]
    pub metadata: Option<WebhookMetadata>,
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
    #[serde(default)]
    pub statuses: Vec<WebhookStatus>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMetadata {
    pub display_phone_number: String,
    pub phone_number_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMessage {
    pub from: String,
    pub id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(default)]
    pub text: Option<TextMessage>,
    #[serde(default)]
    pub image: Option<MediaMessage>,
    #[serde(default)]
    pub video: Option<MediaMessage>,
    #[serde(default)]
    pub audio: Option<MediaMessage>,
    #[serde(default)]
    pub document: Option<MediaMessage>,
    #[serde(default)]
    pub sticker: Option<MediaMessage>,
    #[serde(default)]
    pub interactive: Option<InteractiveMessage>,
    #[serde(default)]
    pub button: Option<ButtonMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TextMessage {
    pub body: String,
}

/// Image, video, audio, document or sticker
#[derive(Debug, Deserialize)]
pub struct MediaMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Set on audio recorded as a voice note
    #[serde(default)]
    pub voice: bool,
}

#[derive(Debug, Deserialize)]
pub struct InteractiveMessage {
    #[serde(rename = "type")]
    pub interactive_type: String,
    #[serde(default)]
    pub button_reply: Option<InteractiveReply>,
    #[serde(default)]
    pub list_reply: Option<InteractiveReply>,
}

#[derive(Debug, Deserialize)]
pub struct InteractiveReply {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ButtonMessage {
    pub text: String,
    #[serde(default)]
    pub payload: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookStatus {
    pub id: String,
    pub status: String,
    pub timestamp: String,
    pub recipient_id: String,
}

/// Verify webhook signature
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    // Signature format: sha256=<hex>
    let Some(signature_hex) = signature.strip_prefix("sha256=") else {
        warn!("Invalid signature format");
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        warn!("Failed to create HMAC");
        return false;
    };

    mac.update(payload);

    let Ok(expected) = hex::decode(signature_hex) else {
        warn!("Failed to decode signature hex");
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}

/// Extract the relayable messages from a webhook payload
///
/// Status callbacks, reactions and system notices are skipped, as are
/// messages whose sender id cannot be parsed.
pub fn extract_inbound_messages(payload: &WebhookPayload) -> Vec<InboundMessage> {
    payload
        .entry
        .iter()
        .flat_map(|entry| &entry.changes)
        .filter(|change| change.field == "messages")
        .flat_map(|change| &change.value.messages)
        .filter_map(to_inbound)
        .collect()
}

fn to_inbound(message: &WebhookMessage) -> Option<InboundMessage> {
    if matches!(message.msg_type.as_str(), "reaction" | "system") {
        debug!(msg_type = %message.msg_type, id = %message.id, "Skipping non-relayable message");
        return None;
    }

    let sender = match SenderId::new(message.from.as_str()) {
        Ok(sender) => sender,
        Err(e) => {
            warn!(error = %e, id = %message.id, "Skipping message with invalid sender");
            return None;
        },
    };

    let (kind, body) = kind_and_body(message);
    let mut inbound = InboundMessage::new(sender, body, kind).with_message_id(message.id.as_str());
    if let Some(ts) = message.timestamp.as_deref().and_then(|ts| ts.parse().ok()) {
        inbound = inbound.with_timestamp(ts);
    }
    Some(inbound)
}

fn kind_and_body(message: &WebhookMessage) -> (MessageKind, String) {
    let caption = |media: Option<&MediaMessage>| {
        media
            .and_then(|m| m.caption.clone())
            .unwrap_or_default()
    };

    match message.msg_type.as_str() {
        "text" => (
            MessageKind::Chat,
            message
                .text
                .as_ref()
                .map(|t| t.body.clone())
                .unwrap_or_default(),
        ),
        "image" => (MessageKind::Image, caption(message.image.as_ref())),
        "video" => (MessageKind::Video, caption(message.video.as_ref())),
        "document" => (MessageKind::Document, caption(message.document.as_ref())),
        "sticker" => (MessageKind::Sticker, String::new()),
        "audio" | "voice" => {
            let voice = message.msg_type == "voice" || message.audio.as_ref().is_some_and(|a| a.voice);
            let kind = if voice { MessageKind::Ptt } else { MessageKind::Audio };
            (kind, String::new())
        },
        "location" => (MessageKind::Location, String::new()),
        "contacts" => (MessageKind::Vcard, String::new()),
        "interactive" => {
            let title = message
                .interactive
                .as_ref()
                .and_then(|i| i.button_reply.as_ref().or(i.list_reply.as_ref()))
                .map(|r| r.title.clone())
                .unwrap_or_default();
            (MessageKind::Interactive, title)
        },
        "button" => (
            MessageKind::Button,
            message
                .button
                .as_ref()
                .map(|b| b.text.clone())
                .unwrap_or_default(),
        ),
        _ => (MessageKind::Unknown, String::new()),
    }
}
