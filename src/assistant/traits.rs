use async_trait::async_trait;

use crate::utils::PortalError;

/// The remote assistant: one message in, one reply out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// Send a trimmed user message and return the reply text.
    /// Any transport, status or payload problem is an `Err`.
    async fn respond(&self, message: &str) -> Result<String, PortalError>;
}
