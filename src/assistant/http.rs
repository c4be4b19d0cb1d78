use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::COOKIE, Client};
use tracing::{debug, warn};

use super::traits::Responder;
use super::types::{AssistantPayload, AssistantRequest};
use crate::constants::{HTTP_CONNECT_TIMEOUT_SECS, SESSION_COOKIE_ENV};
use crate::utils::PortalError;

/// Assistant reached over HTTP: POST `{"message": ...}`, JSON reply
pub struct HttpResponder {
    client: Client,
    endpoint: String,
    session_cookie: Option<String>,
}

impl HttpResponder {
    /// Create a responder for `endpoint`.
    /// Session cookie priority: environment variable > config > none.
    pub fn new(
        endpoint: &str,
        config_session_cookie: Option<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, PortalError> {
        let session_cookie = std::env::var(SESSION_COOKIE_ENV)
            .ok()
            .filter(|c| !c.is_empty())
            .or(config_session_cookie);

        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS));
        if let Some(limit) = request_timeout {
            builder = builder.timeout(limit);
        }
        let client = builder
            .build()
            .map_err(|e| PortalError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            session_cookie,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, message: &str) -> Result<String, PortalError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&AssistantRequest { message });

        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "assistant request failed");
            PortalError::NetworkError(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "assistant returned error status");
            return Err(PortalError::ApiError {
                status: status.as_u16(),
            });
        }

        let payload: AssistantPayload = response
            .json()
            .await
            .map_err(|e| PortalError::MalformedResponse(e.to_string()))?;

        debug!("assistant reply received");
        Ok(payload.into_reply())
    }
}
