//! WhatsApp integration
//!
//! Sends text replies through the WhatsApp Business Cloud API and turns
//! webhook deliveries into domain messages.

pub mod client;
pub mod webhook;

pub use client::{
    SendMessageResponse, WhatsAppClient, WhatsAppClientConfig, WhatsAppError, normalize_recipient,
};
pub use webhook::{WebhookPayload, extract_inbound_messages, verify_signature};
