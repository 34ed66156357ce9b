//! Backend HTTP client
//!
//! Talks to the order-management backend: `POST /api/whatsapp_in` for every
//! relayed text message and `GET /api/health` for readiness probes.

use std::time::Duration;

use domain::{RelayRequest, RelayResponse};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Path of the message intake endpoint
pub const WHATSAPP_IN_PATH: &str = "/api/whatsapp_in";

/// Path of the backend health endpoint
pub const HEALTH_PATH: &str = "/api/health";

/// Longest error body kept in [`BackendError::Status`]
const MAX_ERROR_BODY_LEN: usize = 512;

/// Backend client errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend could not be reached
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Backend did not answer within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered with a body that is not the expected JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Backend client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendClientConfig {
    /// Backend base URL (default: <http://localhost:5000>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds (default: 5)
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

impl Default for BackendClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendHealth {
    /// Status string reported by the backend (e.g. "healthy")
    pub status: String,
    /// Optional human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendHealth {
    /// Whether the backend reports itself as healthy
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// HTTP client for the order-management backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be initialized.
    pub fn new(config: BackendClientConfig) -> Result<Self, BackendError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| BackendError::Configuration(format!("Invalid base_url: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendError::Configuration(format!(
                "base_url must use http or https: {base_url}"
            )));
        }

        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs.max(1)))
            .user_agent(format!("glassbot-relay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Forward one text message to `POST /api/whatsapp_in`
    #[instrument(skip(self, request), fields(from = %request.from))]
    pub async fn whatsapp_in(&self, request: &RelayRequest) -> Result<RelayResponse, BackendError> {
        debug!(body_len = request.body.len(), "Posting message to backend");

        let response = self
            .client
            .post(self.endpoint(WHATSAPP_IN_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let response: RelayResponse = self.read_json(response).await?;
        debug!(has_reply = response.reply_text().is_some(), "Backend answered");
        Ok(response)
    }

    /// Fetch `GET /api/health`
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<BackendHealth, BackendError> {
        let response = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        self.read_json(response).await
    }

    /// Check if the backend answers its health endpoint
    pub async fn is_healthy(&self) -> bool {
        match self.health().await {
            Ok(health) if health.is_healthy() => {
                debug!(status = %health.status, "Backend health check passed");
                true
            },
            Ok(health) => {
                warn!(status = %health.status, "Backend reports itself unhealthy");
                false
            },
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                false
            },
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, BackendError> {
        let status = response.status();

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY_LEN {
                let mut cut = MAX_ERROR_BODY_LEN;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn classify(&self, error: &reqwest::Error) -> BackendError {
        if error.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else if error.is_decode() {
            BackendError::InvalidResponse(error.to_string())
        } else {
            BackendError::ConnectionFailed(error.to_string())
        }
    }
}
