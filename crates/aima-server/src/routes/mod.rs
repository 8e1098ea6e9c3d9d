pub mod courses;
pub mod health;
pub mod quiz;
pub mod send_email;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /send-email        POST  relay a form submission by email
/// /courses           GET   catalog listing (?program=&available=)
/// /quiz/questions    GET   the question bank
/// /quiz              POST  score a full set of answers
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/send-email", post(send_email::send_email))
        .route("/courses", get(courses::list_courses))
        .route("/quiz/questions", get(quiz::list_questions))
        .route("/quiz", post(quiz::score_quiz))
}
