//! Backend API configuration.

use integration_backend::BackendClientConfig;
use serde::{Deserialize, Serialize};

/// Where the order-management backend lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_timeout() -> u64 {
    15
}

const fn default_connect_timeout() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl BackendConfig {
    /// Settings for [`integration_backend::BackendClient`]
    #[must_use]
    pub fn to_client_config(&self) -> BackendClientConfig {
        BackendClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }
}
