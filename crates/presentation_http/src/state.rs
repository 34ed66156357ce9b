//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::ports::{BackendPort, MessengerPort};
use domain::InboundMessage;
use integration_whatsapp::WhatsAppClient;
use tokio::sync::mpsc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Backend API, used for readiness probes
    pub backend: Arc<dyn BackendPort>,
    /// Backend base URL, reported by `/ready`
    pub backend_url: String,
    /// WhatsApp webhook wiring; `None` while WhatsApp is not configured
    pub whatsapp: Option<WhatsAppState>,
}

/// Everything the webhook routes need
#[derive(Clone)]
pub struct WhatsAppState {
    /// Client used for verify token and signature checks
    pub client: Arc<WhatsAppClient>,
    /// Messenger port, consulted for the sender allowlist
    pub messenger: Arc<dyn MessengerPort>,
    /// Hands accepted messages to the relay dispatcher
    pub inbound: mpsc::Sender<InboundMessage>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("backend_url", &self.backend_url)
            .field("whatsapp", &self.whatsapp)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for WhatsAppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppState")
            .field("platform", &self.messenger.platform())
            .field("queue_capacity", &self.inbound.max_capacity())
            .finish_non_exhaustive()
    }
}
