//! `GET /api/quiz/questions` and `POST /api/quiz`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use aima_core::engine::QuizSession;
use aima_core::error::CoreError;
use aima_core::model::{CourseOffering, Language, QuizQuestion};
use aima_core::report::QuizReport;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionList {
    pub questions: Vec<QuizQuestion>,
    pub max_points: u32,
}

pub async fn list_questions(State(state): State<AppState>) -> Json<QuestionList> {
    Json(QuestionList {
        questions: state.bank.questions().to_vec(),
        max_points: state.bank.max_points(),
    })
}

#[derive(Debug, Deserialize)]
pub struct QuizAnswers {
    /// One option id per question, in question order.
    pub answers: Vec<String>,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct QuizResult {
    pub report: QuizReport,
    /// Upcoming offerings of the recommended program.
    pub offerings: Vec<CourseOffering>,
}

pub async fn score_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizAnswers>, JsonRejection>,
) -> AppResult<Json<QuizResult>> {
    let Json(body) = payload?;

    let mut session = QuizSession::new(&state.bank);
    session.answer_all(&body.answers).map_err(CoreError::from)?;
    let report = QuizReport::from_session(&session, body.language).map_err(CoreError::from)?;

    let offerings = state
        .catalog
        .filter_by_program(report.recommendation.program)
        .cloned()
        .collect();

    Ok(Json(QuizResult { report, offerings }))
}
