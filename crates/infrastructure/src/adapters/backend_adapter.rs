//! Backend API adapter
//!
//! Implements the `BackendPort` trait using the backend integration crate.

use application::error::ApplicationError;
use application::ports::BackendPort;
use async_trait::async_trait;
use domain::{RelayRequest, RelayResponse};
use integration_backend::{BackendClient, BackendClientConfig, BackendError};
use tracing::instrument;

/// Adapter that implements `BackendPort` using `BackendClient`
#[derive(Debug, Clone)]
pub struct BackendApiAdapter {
    client: BackendClient,
}

impl BackendApiAdapter {
    /// Create a new backend adapter
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: BackendClientConfig) -> Result<Self, BackendError> {
        Ok(Self {
            client: BackendClient::new(config)?,
        })
    }

    /// Base URL the adapter talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl BackendPort for BackendApiAdapter {
    #[instrument(skip(self, request), fields(from = %request.from))]
    async fn relay(&self, request: &RelayRequest) -> Result<RelayResponse, ApplicationError> {
        self.client
            .whatsapp_in(request)
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("Backend call failed: {e}")))
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }
}
