use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::api::dtos::responses::ProgressResponse;
use crate::domain::models::booking::DisciplinePatch;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use std::sync::Arc;

pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(discipline): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let progress = state
        .lifecycle
        .progress(&discipline)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No active bookings for discipline: {discipline}")))?;

    Ok(Json(ProgressResponse {
        discipline,
        total_units: progress.total_units,
        recorded_units: progress.recorded_units,
        remaining_units: progress.remaining(),
        percentage: progress.percentage(),
    }))
}

pub async fn update_discipline(
    State(state): State<Arc<AppState>>,
    Path(discipline): Path<String>,
    Json(patch): Json<DisciplinePatch>,
) -> Result<impl IntoResponse, AppError> {
    state.lifecycle.update_discipline(&discipline, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn revert_completion(
    State(state): State<Arc<AppState>>,
    Path(discipline): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reverted = state.lifecycle.revert_completion(&discipline).await?;
    Ok(Json(json!({ "reverted": reverted })))
}
