//! Backend port - The order-management API behind the relay

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::{RelayRequest, RelayResponse};

use crate::error::ApplicationError;

/// Port for the backend that owns all order-management logic
///
/// Every failure mode (unreachable, timeout, non-2xx status, malformed body)
/// is reported as an error; callers do not distinguish between them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BackendPort: Send + Sync {
    /// Forward one text message and return the backend's answer
    async fn relay(&self, request: &RelayRequest) -> Result<RelayResponse, ApplicationError>;

    /// Check if the backend reports itself healthy
    async fn is_healthy(&self) -> bool;
}
