//! WhatsApp webhook handlers
//!
//! Handles WhatsApp Business API webhook verification and message intake.
//! Intake only validates and queues; relaying happens on the dispatcher's
//! tasks so Meta gets its `200` right away. Queueing never waits: when the
//! relay queue is full the message is dropped and logged.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use integration_whatsapp::{WebhookPayload, extract_inbound_messages};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::ApiError,
    state::{AppState, WhatsAppState},
};

/// Header carrying the HMAC-SHA256 of the request body
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct WebhookVerifyQuery {
    /// The mode (should be "subscribe")
    #[serde(rename = "hub.mode")]
    pub hub_mode: Option<String>,
    /// The verify token to validate
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    /// The challenge to return on success
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

/// Acknowledgement for a webhook delivery
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Always "ok"
    pub status: String,
    /// Messages queued for relaying
    pub accepted: usize,
    /// Messages dropped (sender not on the allowlist)
    pub ignored: usize,
    /// Messages dropped because the relay queue was full
    pub dropped: usize,
}

fn configured(state: &AppState) -> Result<&WhatsAppState, ApiError> {
    state.whatsapp.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("WhatsApp integration not configured".to_string())
    })
}

/// WhatsApp webhook verification (GET)
///
/// Meta sends a GET request to verify webhook ownership during setup.
/// We must verify the token and return the challenge.
#[instrument(skip(state, query))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookVerifyQuery>,
) -> Result<String, ApiError> {
    let whatsapp = configured(&state)?;

    let verify_token = whatsapp.client.verify_token();
    if verify_token.is_empty() {
        warn!("WhatsApp webhook verification attempted but verify_token not configured");
        return Err(ApiError::ServiceUnavailable(
            "WhatsApp verify_token not configured".to_string(),
        ));
    }

    let Some(mode) = query.hub_mode else {
        debug!("Missing hub.mode in webhook verification");
        return Err(ApiError::BadRequest("Missing hub.mode".to_string()));
    };

    if mode != "subscribe" {
        debug!(mode = %mode, "Invalid hub.mode");
        return Err(ApiError::BadRequest("Invalid hub.mode".to_string()));
    }

    let Some(hub_verify_token) = query.hub_verify_token else {
        debug!("Missing hub.verify_token");
        return Err(ApiError::BadRequest("Missing hub.verify_token".to_string()));
    };

    if hub_verify_token != verify_token {
        warn!("WhatsApp webhook verification failed: token mismatch");
        return Err(ApiError::Forbidden("Token mismatch".to_string()));
    }

    let Some(challenge) = query.hub_challenge else {
        debug!("Missing hub.challenge");
        return Err(ApiError::BadRequest("Missing hub.challenge".to_string()));
    };

    info!("WhatsApp webhook verified, relay is paired with Meta");
    Ok(challenge)
}

/// WhatsApp webhook message handler (POST)
///
/// Verifies the signature, turns the delivery into inbound messages and
/// queues the ones from allowed senders.
#[instrument(skip(state, headers, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let whatsapp = configured(&state)?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    whatsapp
        .client
        .verify_signature(&body, signature)
        .inspect_err(|e| warn!(error = %e, "WhatsApp webhook signature verification failed"))?;

    let payload: WebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to parse WhatsApp webhook payload");
        ApiError::BadRequest(format!("Invalid payload: {e}"))
    })?;

    let messages = extract_inbound_messages(&payload);
    if messages.is_empty() {
        debug!("No messages in webhook payload (might be status update)");
    }

    let mut accepted = 0;
    let mut ignored = 0;
    let mut dropped = 0;

    for message in messages {
        if !whatsapp.messenger.is_allowed(&message.sender) {
            warn!(from = %message.sender, "Ignoring message from sender not on the whitelist");
            ignored += 1;
            continue;
        }

        debug!(from = %message.sender, kind = %message.kind, "Queueing inbound message");
        match whatsapp.inbound.try_send(message) {
            Ok(()) => accepted += 1,
            Err(TrySendError::Full(message)) => {
                warn!(
                    from = %message.sender,
                    message_id = ?message.message_id,
                    "Relay queue full, dropping message"
                );
                dropped += 1;
            },
            Err(TrySendError::Closed(_)) => {
                error!("Relay dispatcher is gone, cannot queue message");
                return Err(ApiError::ServiceUnavailable(
                    "Relay is shutting down".to_string(),
                ));
            },
        }
    }

    if accepted > 0 {
        info!(accepted, "Queued WhatsApp messages for relaying");
    }

    Ok(Json(WebhookAck {
        status: "ok".to_string(),
        accepted,
        ignored,
        dropped,
    }))
}
