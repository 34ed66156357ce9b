//! Relay service
//!
//! Turns one inbound message into at most one outbound reply, consulting the
//! backend for every message that carries text.

use std::sync::Arc;

use domain::{InboundMessage, RelayRequest, SenderId};
use tracing::{debug, error, info, instrument};

use super::reply_templates::{ATTACHMENT_REDIRECT_MESSAGE, ERROR_MESSAGE, WELCOME_MESSAGE};
use crate::ports::{BackendPort, MessengerPort, OutgoingTextMessage};

/// Which branch handled an inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Message had an attachment; the text template was sent instead
    AttachmentRedirected,
    /// Message had no text; the welcome message was sent
    WelcomeSent,
    /// Backend answered with a reply that was relayed
    Replied,
    /// Backend answered without a reply; nothing was sent
    NoReply,
    /// Backend call failed; the generic error message was sent
    BackendFailed,
}

impl RelayOutcome {
    /// Whether this outcome involved a backend call
    #[must_use]
    pub const fn contacted_backend(&self) -> bool {
        matches!(self, Self::Replied | Self::NoReply | Self::BackendFailed)
    }
}

/// Stateless relay between the messaging platform and the backend
///
/// Holds only shared handles, so one instance serves any number of
/// concurrent messages.
pub struct RelayService {
    messenger: Arc<dyn MessengerPort>,
    backend: Arc<dyn BackendPort>,
}

impl std::fmt::Debug for RelayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayService")
            .field("platform", &self.messenger.platform())
            .finish_non_exhaustive()
    }
}

impl RelayService {
    /// Create a new relay service
    pub fn new(messenger: Arc<dyn MessengerPort>, backend: Arc<dyn BackendPort>) -> Self {
        Self { messenger, backend }
    }

    /// Handle one inbound message
    ///
    /// Never fails: backend errors degrade to the generic error reply and
    /// send errors are logged.
    #[instrument(skip(self, message), fields(from = %message.sender, kind = %message.kind))]
    pub async fn handle_inbound(&self, message: &InboundMessage) -> RelayOutcome {
        info!(
            from = %message.sender,
            body = %message.body,
            kind = %message.kind,
            has_attachment = message.has_attachment,
            "New message received"
        );

        if message.has_attachment {
            info!("Media message received, redirecting to text");
            self.send(&message.sender, ATTACHMENT_REDIRECT_MESSAGE).await;
            return RelayOutcome::AttachmentRedirected;
        }

        if !message.has_text() {
            debug!("Empty message, sending welcome");
            self.send(&message.sender, WELCOME_MESSAGE).await;
            return RelayOutcome::WelcomeSent;
        }

        let request = RelayRequest::from_inbound(message);
        debug!(body_len = request.body.len(), "Forwarding text message to backend");

        match self.backend.relay(&request).await {
            Ok(response) => match response.reply_text() {
                Some(reply) => {
                    if self.send(&message.sender, reply).await {
                        info!("Reply sent successfully");
                    }
                    RelayOutcome::Replied
                },
                None => {
                    debug!("Backend returned no reply");
                    RelayOutcome::NoReply
                },
            },
            Err(e) => {
                error!(error = %e, "Text processing error");
                self.send(&message.sender, ERROR_MESSAGE).await;
                RelayOutcome::BackendFailed
            },
        }
    }

    /// Send a text, logging instead of propagating failures
    async fn send(&self, recipient: &SenderId, text: &str) -> bool {
        let message = OutgoingTextMessage::new(recipient.clone(), text);
        match self.messenger.send_text(message).await {
            Ok(message_id) => {
                debug!(message_id = %message_id, to = %recipient, "Message sent");
                true
            },
            Err(e) => {
                error!(
                    error = %e,
                    to = %recipient,
                    platform = self.messenger.platform(),
                    "Failed to send message"
                );
                false
            },
        }
    }
}
