//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the backend
//! and WhatsApp integration crates, loads configuration and sets up logging.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, BackendConfig, LogFormat, ServerConfig, WhatsAppConfig};
pub use telemetry::{DEFAULT_LOG_FILTER, init_logging};
