//! Relay request and response exchanged with the backend

use serde::{Deserialize, Serialize};

use super::InboundMessage;
use crate::value_objects::SenderId;

/// Payload forwarded to the backend for one text message
///
/// Serialises to `{"from": ..., "body": ..., "hasMedia": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    /// Conversation the message came from
    pub from: SenderId,
    /// Original, untrimmed message body
    pub body: String,
    /// Always `false`: attachment messages are never forwarded
    #[serde(rename = "hasMedia")]
    pub has_media: bool,
}

impl RelayRequest {
    /// Build the forwarded payload for a text message
    pub fn from_inbound(message: &InboundMessage) -> Self {
        Self {
            from: message.sender.clone(),
            body: message.body.clone(),
            has_media: false,
        }
    }
}

/// Backend answer for one relayed message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    /// Text to send back to the sender
    #[serde(default)]
    pub reply: Option<String>,
}

impl RelayResponse {
    /// Response carrying a reply
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// The reply to relay, if there is a non-empty one
    pub fn reply_text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|reply| !reply.is_empty())
    }
}
