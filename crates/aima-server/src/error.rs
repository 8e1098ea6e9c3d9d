use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use aima_core::error::CoreError;
use aima_core::forms::FieldIssue;

/// Message returned to the site when delivery fails; details stay in the logs.
pub const DELIVERY_FAILED: &str = "Failed to send email";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error": ..., "code": ... }`
/// JSON bodies, which keeps the relay's `{ "error" }` contract.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `aima_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Form fields failed validation.
    #[error("invalid form fields")]
    Validation(Vec<FieldIssue>),

    /// The mailer could not deliver the email.
    #[error("delivery failed: {0:#}")]
    Delivery(anyhow::Error),

    /// Any failure of `POST /api/send-email`; always a 500.
    #[error(transparent)]
    Relay(Box<AppError>),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// Wrap a failure of the mail relay route, which answers 500 for every
    /// failure whatever its cause.
    pub fn relay(err: AppError) -> Self {
        match err {
            AppError::Relay(_) => err,
            other => AppError::Relay(Box::new(other)),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(err) if !err.is_client_error() => {
                tracing::error!(error = %err, "server-side data is invalid");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Core(err @ CoreError::OfferingNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            AppError::Core(CoreError::Quiz(err)) => {
                (StatusCode::BAD_REQUEST, "INVALID_ANSWER", err.to_string())
            }
            AppError::Core(err) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation(issues) => {
                let message = issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
            }
            AppError::Delivery(err) => {
                tracing::error!(error = %format!("{err:#}"), "email delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DELIVERY_FAILED",
                    DELIVERY_FAILED.to_string(),
                )
            }
            AppError::Relay(inner) => {
                let (_, code, message) = inner.parts();
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
