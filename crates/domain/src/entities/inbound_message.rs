//! Inbound message entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{MessageKind, SenderId};

/// A message received from the messaging platform
///
/// Created once per inbound notification and handled exactly once. Nothing
/// about it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform message id, if the platform reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Conversation the message came from
    pub sender: SenderId,
    /// Text content, possibly empty or whitespace-only
    #[serde(default)]
    pub body: String,
    /// Whether the message carries a media attachment
    pub has_attachment: bool,
    /// Kind reported by the platform
    pub kind: MessageKind,
    /// Unix timestamp in seconds, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl InboundMessage {
    /// Create an inbound message; the attachment flag follows the kind
    pub fn new(sender: SenderId, body: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            message_id: None,
            sender,
            body: body.into(),
            has_attachment: kind.has_media(),
            kind,
            timestamp: None,
        }
    }

    /// Create a plain text message
    pub fn text(sender: SenderId, body: impl Into<String>) -> Self {
        Self::new(sender, body, MessageKind::Chat)
    }

    /// Override the attachment flag
    #[must_use]
    pub const fn with_attachment(mut self, has_attachment: bool) -> Self {
        self.has_attachment = has_attachment;
        self
    }

    /// Attach the platform message id
    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Attach the platform timestamp
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Whether the body has any non-whitespace content
    pub fn has_text(&self) -> bool {
        !self.body.trim().is_empty()
    }
}
