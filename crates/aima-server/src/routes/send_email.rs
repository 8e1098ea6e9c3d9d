//! `POST /api/send-email`: render a form submission and relay it by email.
//!
//! The site only distinguishes `{ success: true }` (200) from `{ error }`
//! (500), so every failure on this route is a 500.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use aima_core::forms::{SendEmailRequest, SendEmailResponse};
use aima_core::traits::OutgoingEmail;
use aima_report::render_submission;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> AppResult<Json<SendEmailResponse>> {
    relay_submission(state, payload)
        .await
        .map_err(AppError::relay)
}

async fn relay_submission(
    state: AppState,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> AppResult<Json<SendEmailResponse>> {
    let Json(request) = payload?;
    let submission_id = Uuid::new_v4();

    let to: Vec<String> = request
        .to
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();
    if to.is_empty() {
        return Err(AppError::BadRequest("at least one recipient is required".into()));
    }

    let submission = request.submission()?;
    let issues = submission.validate();
    if !issues.is_empty() {
        tracing::debug!(%submission_id, ?issues, "rejected form submission");
        return Err(AppError::Validation(issues));
    }

    let form_type = submission.form_type();
    let subject = match request.subject.trim() {
        "" => form_type.default_subject().to_string(),
        subject => subject.to_string(),
    };
    let email = OutgoingEmail {
        to,
        subject,
        html: render_submission(&submission, chrono::Local::now().naive_local()),
    };

    state
        .mailer
        .send(&email)
        .await
        .map_err(AppError::Delivery)?;

    tracing::info!(
        %submission_id,
        %form_type,
        mailer = state.mailer.name(),
        recipients = email.to.len(),
        "form submission relayed"
    );
    Ok(Json(SendEmailResponse::sent()))
}
