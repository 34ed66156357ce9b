//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `backend`: order-management backend
//! - `messenger`: WhatsApp Business Cloud API
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`
//! in the working directory, `GLASSBOT_*` environment variables (nested keys
//! separated by `__`, e.g. `GLASSBOT_SERVER__PORT`), and finally
//! `BACKEND_API_URL` for the backend base URL.

mod backend;
mod messenger;
mod server;

use std::path::Path;

use config::{ConfigError, FileFormat, FileSourceFile};
use serde::{Deserialize, Serialize};

pub use backend::BackendConfig;
pub use messenger::WhatsAppConfig;
pub use server::{LogFormat, ServerConfig};

/// Environment variable prefix for nested settings
pub const ENV_PREFIX: &str = "GLASSBOT";

/// Environment variable that overrides `backend.base_url`
pub const BACKEND_URL_ENV: &str = "BACKEND_API_URL";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend API configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// WhatsApp configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            config::File::with_name("config").required(false),
            std::env::var(BACKEND_URL_ENV).ok(),
        )
    }

    /// Load configuration from a specific file
    ///
    /// The file may be missing. Environment variables still apply, and
    /// `backend_url` stands in for `BACKEND_API_URL`.
    pub fn load_from(path: &Path, backend_url: Option<String>) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(false), backend_url)
    }

    fn build(
        file: config::File<FileSourceFile, FileFormat>,
        backend_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let backend_url = backend_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("backend.base_url", "http://localhost:5000")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., GLASSBOT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("whatsapp.whitelist")
                    .try_parsing(true),
            )
            .set_override_option("backend.base_url", backend_url)?
            .build()?;

        config.try_deserialize()
    }
}
