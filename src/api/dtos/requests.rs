use crate::domain::models::booking::Period;
use crate::domain::models::notification::Role;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub date: NaiveDate,
    pub period: Period,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub course: String,
    pub discipline: String,
    pub teacher: String,
    pub total_units: Option<i64>,
    pub recorded_units: Option<i64>,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    pub cancelled_by: Role,
    pub reason: String,
}

#[derive(Deserialize, Default)]
pub struct DenyConfirmationRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub period: Period,
}
