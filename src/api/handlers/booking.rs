use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{CancelBookingRequest, CreateBookingRequest, SlotQuery};
use crate::api::dtos::responses::{BookingCreatedResponse, SlotStatusResponse};
use crate::domain::models::booking::{BookingPatch, NewBookingParams};
use crate::domain::services::defaults::{DEFAULT_RECORDED_UNITS, DEFAULT_TOTAL_UNITS};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.lifecycle.list().await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.get(&booking_id).await?;
    Ok(Json(booking))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state
        .lifecycle
        .create(NewBookingParams {
            date: payload.date,
            period: payload.period,
            start_time: payload.start_time,
            end_time: payload.end_time,
            course: payload.course,
            discipline: payload.discipline,
            teacher: payload.teacher,
            total_units: payload.total_units.unwrap_or(DEFAULT_TOTAL_UNITS),
            recorded_units: payload.recorded_units.unwrap_or(DEFAULT_RECORDED_UNITS),
        })
        .await?;

    let confirmation_link = format!(
        "{}/confirmacao/{}",
        state.config.public_base_url, created.confirmation_token
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            booking: created,
            confirmation_link,
        }),
    ))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(patch): Json<BookingPatch>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.lifecycle.update(&booking_id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.lifecycle.delete(&booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state
        .lifecycle
        .cancel(&booking_id, payload.cancelled_by, payload.reason)
        .await?;
    Ok(Json(cancelled))
}

pub async fn advance_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.advance_status(&booking_id).await?;
    Ok(Json(booking))
}

pub async fn find_by_slot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.find_by_slot(query.date, query.period).await?;
    Ok(Json(SlotStatusResponse {
        occupied: booking.is_some(),
        booking,
    }))
}
