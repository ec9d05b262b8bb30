use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Slot already booked by {conflicting_booking_id}")]
    SlotConflict { conflicting_booking_id: String },
    #[error("Unit limit exceeded: {remaining_units} of {total_units} units remain for {discipline}")]
    UnitLimitExceeded {
        discipline: String,
        remaining_units: i64,
        total_units: i64,
    },
    #[error("Discipline already complete: {0}")]
    DisciplineComplete(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    // 2067 = SQLite Unique Constraint
                    if db_err.code().unwrap_or_default() == "2067" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" })),
                        )
                            .into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::SlotConflict {
                conflicting_booking_id,
            } => (
                StatusCode::CONFLICT,
                json!({
                    "error": self.to_string(),
                    "conflicting_booking_id": conflicting_booking_id,
                }),
            ),
            AppError::UnitLimitExceeded {
                discipline,
                remaining_units,
                total_units,
            } => (
                StatusCode::CONFLICT,
                json!({
                    "error": self.to_string(),
                    "discipline": discipline,
                    "remaining_units": remaining_units,
                    "total_units": total_units,
                }),
            ),
            AppError::DisciplineComplete(discipline) => (
                StatusCode::CONFLICT,
                json!({ "error": self.to_string(), "discipline": discipline }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
