//! Client for the `/api/send-email` relay endpoint.

use std::time::Duration;

use tracing::instrument;

use aima_core::forms::{SendEmailRequest, SendEmailResponse};

use crate::error::MailError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Posts form submissions to a running relay.
pub struct RelayClient {
    url: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(url: &str) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| MailError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit a form. Any non-2xx response is an error carrying the relay's
    /// `error` message when it sent one.
    #[instrument(skip(self, request), fields(url = %self.url, form_type = %request.form_type))]
    pub async fn send(&self, request: &SendEmailRequest) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    MailError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            MailError::Network(format!("failed to read relay response (HTTP {status}): {e}"))
        })?;

        if status.is_success() {
            tracing::info!(status = status.as_u16(), "submission relayed");
            return Ok(());
        }

        let message = match serde_json::from_str::<SendEmailResponse>(&body) {
            Ok(SendEmailResponse::Failed { error }) => error,
            _ if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            _ => body,
        };
        Err(MailError::Relay {
            status: status.as_u16(),
            message,
        })
    }
}
