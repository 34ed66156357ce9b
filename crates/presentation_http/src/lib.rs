//! Glass Bot HTTP presentation layer
//!
//! Serves the WhatsApp webhook that feeds the relay, plus liveness and
//! readiness probes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, WhatsAppState};
