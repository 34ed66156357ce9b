//! Messenger port - Outbound side of the messaging client
//!
//! Inbound notifications reach the application through the
//! [`RelayDispatcher`](crate::services::RelayDispatcher) channel; this port
//! covers everything the relay needs to talk back to a conversation.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::SenderId;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// An outgoing text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingTextMessage {
    /// Conversation to send to
    pub recipient: SenderId,
    /// Text content
    pub text: String,
}

impl OutgoingTextMessage {
    /// Create a new outgoing text message
    #[must_use]
    pub fn new(recipient: SenderId, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
        }
    }
}

/// Port for the messaging platform the relay is attached to
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Display name of the platform, for logs
    fn platform(&self) -> &'static str;

    /// Check if the messaging service is reachable
    async fn is_available(&self) -> bool;

    /// Check if a sender may use the relay
    fn is_allowed(&self, sender: &SenderId) -> bool;

    /// Send a text message
    ///
    /// Returns the platform's message ID for the sent message.
    async fn send_text(&self, message: OutgoingTextMessage) -> Result<String, ApplicationError>;
}
