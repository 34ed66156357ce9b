//! Relay dispatcher
//!
//! Receives inbound notifications from the messaging client and handles
//! each one on its own task. There is no ordering between messages and no
//! per-sender serialisation.

use std::sync::Arc;

use domain::InboundMessage;
use tokio::{sync::mpsc, task::JoinSet};
use tracing::{debug, error, info};

use super::relay_service::{RelayOutcome, RelayService};

/// Create the channel inbound notifications travel on
///
/// The sender side goes to whatever receives messages from the platform
/// (the webhook handler); the receiver side goes to [`RelayDispatcher::run`].
pub fn inbound_channel(
    capacity: usize,
) -> (mpsc::Sender<InboundMessage>, mpsc::Receiver<InboundMessage>) {
    mpsc::channel(capacity.max(1))
}

/// Fans inbound messages out to one task each
#[derive(Debug, Clone)]
pub struct RelayDispatcher {
    service: Arc<RelayService>,
}

impl RelayDispatcher {
    /// Create a dispatcher around a shared relay service
    pub fn new(service: Arc<RelayService>) -> Self {
        Self { service }
    }

    /// Run until the inbound channel closes
    ///
    /// Returns once every message received so far has been handled.
    pub async fn run(self, mut inbound: mpsc::Receiver<InboundMessage>) {
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                received = inbound.recv() => {
                    let Some(message) = received else {
                        break;
                    };
                    let service = Arc::clone(&self.service);
                    in_flight.spawn(async move {
                        service.handle_inbound(&message).await
                    });
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    Self::log_finished(joined);
                },
            }
        }

        debug!(pending = in_flight.len(), "Inbound channel closed, draining");
        while let Some(joined) = in_flight.join_next().await {
            Self::log_finished(joined);
        }
        info!("Relay dispatcher stopped");
    }

    /// Run on a background task
    pub fn spawn(self, inbound: mpsc::Receiver<InboundMessage>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(inbound))
    }

    fn log_finished(joined: Result<RelayOutcome, tokio::task::JoinError>) {
        match joined {
            Ok(outcome) => debug!(?outcome, "Inbound message handled"),
            Err(e) => error!(error = %e, "Inbound message task failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockBackendPort, MockMessengerPort};
    use crate::services::reply_templates::WELCOME_MESSAGE;
    use domain::{MessageKind, RelayResponse, SenderId};

    fn sender(id: &str) -> SenderId {
        SenderId::new(id).unwrap()
    }

    #[tokio::test]
    async fn every_message_is_handled_before_run_returns() {
        let mut messenger = MockMessengerPort::new();
        messenger.expect_platform().return_const("WhatsApp");
        messenger
            .expect_send_text()
            .times(3)
            .returning(|_| Ok("wamid.out".to_string()));

        let mut backend = MockBackendPort::new();
        backend
            .expect_relay()
            .times(2)
            .returning(|req| Ok(RelayResponse::with_reply(format!("echo {}", req.body))));

        let service = Arc::new(RelayService::new(Arc::new(messenger), Arc::new(backend)));
        let (tx, rx) = inbound_channel(8);

        tx.send(InboundMessage::text(sender("111@c.us"), "/pending"))
            .await
            .unwrap();
        tx.send(InboundMessage::text(sender("222@c.us"), "/ready"))
            .await
            .unwrap();
        tx.send(InboundMessage::new(sender("333@c.us"), "", MessageKind::Chat))
            .await
            .unwrap();
        drop(tx);

        RelayDispatcher::new(service).run(rx).await;
    }

    #[tokio::test]
    async fn spawned_dispatcher_stops_when_senders_drop() {
        let mut messenger = MockMessengerPort::new();
        messenger.expect_platform().return_const("WhatsApp");
        messenger
            .expect_send_text()
            .withf(|m| m.text == WELCOME_MESSAGE)
            .times(1)
            .returning(|_| Ok("wamid.out".to_string()));

        let mut backend = MockBackendPort::new();
        backend.expect_relay().never();

        let service = Arc::new(RelayService::new(Arc::new(messenger), Arc::new(backend)));
        let (tx, rx) = inbound_channel(1);
        let handle = RelayDispatcher::new(service).spawn(rx);

        tx.send(InboundMessage::text(sender("111@c.us"), " "))
            .await
            .unwrap();
        drop(tx);

        handle.await.unwrap();
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let (tx, _rx) = inbound_channel(0);
        assert_eq!(tx.max_capacity(), 1);
    }
}
