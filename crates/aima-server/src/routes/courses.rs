//! `GET /api/courses`

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use aima_core::model::{CourseOffering, ProgramKey};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    /// Program key or display name; all programs when absent.
    pub program: Option<String>,
    /// Only offerings still taking enrollments.
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct CourseListing {
    pub offerings: Vec<CourseOffering>,
}

pub async fn list_courses(
    State(state): State<AppState>,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> AppResult<Json<CourseListing>> {
    let Query(query) = query?;

    let program = query
        .program
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.parse::<ProgramKey>().map_err(AppError::BadRequest))
        .transpose()?;

    let offerings = state
        .catalog
        .search(program, query.available)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(CourseListing { offerings }))
}
