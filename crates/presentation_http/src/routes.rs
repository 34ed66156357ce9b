//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // WhatsApp webhook
        .route(
            "/webhook/whatsapp",
            get(handlers::whatsapp::verify_webhook).post(handlers::whatsapp::handle_webhook),
        )
        // Attach state
        .with_state(state)
}
