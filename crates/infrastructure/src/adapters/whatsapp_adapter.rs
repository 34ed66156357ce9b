//! WhatsApp messenger adapter
//!
//! Implements the `MessengerPort` trait using the WhatsApp integration crate.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{MessengerPort, OutgoingTextMessage};
use async_trait::async_trait;
use domain::SenderId;
use integration_whatsapp::{WhatsAppClient, WhatsAppError};
use tracing::{debug, instrument};

/// Adapter that implements `MessengerPort` using `WhatsAppClient`
#[derive(Clone)]
pub struct WhatsAppMessengerAdapter {
    client: Arc<WhatsAppClient>,
}

impl WhatsAppMessengerAdapter {
    /// Wrap a shared WhatsApp client
    #[must_use]
    pub const fn new(client: Arc<WhatsAppClient>) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for WhatsAppMessengerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppMessengerAdapter")
            .finish_non_exhaustive()
    }
}

fn map_send_error(error: WhatsAppError) -> ApplicationError {
    match error {
        WhatsAppError::InvalidRecipient(recipient) => {
            ApplicationError::Domain(domain::DomainError::InvalidSenderId(recipient))
        },
        WhatsAppError::Configuration(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("WhatsApp send failed: {other}")),
    }
}

#[async_trait]
impl MessengerPort for WhatsAppMessengerAdapter {
    fn platform(&self) -> &'static str {
        "WhatsApp"
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_available().await
    }

    fn is_allowed(&self, sender: &SenderId) -> bool {
        self.client.is_whitelisted(sender.as_str())
    }

    #[instrument(skip(self, message), fields(recipient = %message.recipient))]
    async fn send_text(&self, message: OutgoingTextMessage) -> Result<String, ApplicationError> {
        let response = self
            .client
            .send_text(message.recipient.as_str(), &message.text)
            .await
            .map_err(map_send_error)?;

        let message_id = response
            .message_id()
            .map(str::to_string)
            .ok_or_else(|| {
                ApplicationError::ExternalService("No message ID in response".to_string())
            })?;

        debug!(message_id = %message_id, "WhatsApp text message sent");
        Ok(message_id)
    }
}
