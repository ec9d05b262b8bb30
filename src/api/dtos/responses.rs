use crate::domain::models::booking::Booking;
use crate::domain::models::notification::Role;
use serde::Serialize;

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    #[serde(flatten)]
    pub booking: Booking,
    /// One-time link handed to the teacher for confirm/deny.
    pub confirmation_link: String,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    pub discipline: String,
    pub total_units: i64,
    pub recorded_units: i64,
    pub remaining_units: i64,
    pub percentage: f64,
}

#[derive(Serialize)]
pub struct SlotStatusResponse {
    pub occupied: bool,
    pub booking: Option<Booking>,
}

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub role: Role,
    pub unread: i64,
}
