use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::DenyConfirmationRequest;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

/// Public view behind the one-time link: the confirmation page shows
/// the session details before the teacher chooses.
pub async fn get_confirmation(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.get_by_token(&token).await?;
    Ok(Json(booking))
}

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.confirm(&token).await?;
    Ok(Json(booking))
}

pub async fn deny(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    payload: Option<Json<DenyConfirmationRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(p)| p.reason);
    let booking = state.lifecycle.deny(&token, reason).await?;
    Ok(Json(booking))
}
