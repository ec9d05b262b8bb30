use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::responses::UnreadCountResponse;
use crate::domain::models::notification::Role;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub async fn list_unread(
    State(state): State<Arc<AppState>>,
    Path(role): Path<Role>,
) -> Result<impl IntoResponse, AppError> {
    let items = state.notification_repo.list_unread(role).await?;
    Ok(Json(items))
}

/// Badge count, recomputed from the unread predicate on every call.
pub async fn count_unread(
    State(state): State<Arc<AppState>>,
    Path(role): Path<Role>,
) -> Result<impl IntoResponse, AppError> {
    let unread = state.notification_repo.count_unread(role).await?;
    Ok(Json(UnreadCountResponse { role, unread }))
}

/// Explicit acknowledgement: flips every unread flag of the role.
/// Fetching the list never acknowledges by itself.
pub async fn acknowledge(
    State(state): State<Arc<AppState>>,
    Path(role): Path<Role>,
) -> Result<impl IntoResponse, AppError> {
    let acknowledged = state.notification_repo.mark_all_read(role).await?;
    info!("{} notifications acknowledged for {:?}", acknowledged, role);
    Ok(Json(json!({ "acknowledged": acknowledged })))
}
