use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Viewing roles that keep their own unread state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NotificationEvent {
    TeacherDenial,
    EditorCancellation,
    AdminCancellation,
    UploadCompleted,
}

/// Unread feed entry joined with the booking it refers to, shaped after
/// the columns the notification history screens show.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct NotificationFeedItem {
    pub booking_id: String,
    pub event_type: NotificationEvent,
    pub armed_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub teacher: String,
    pub course: String,
    pub discipline: String,
    pub cancellation_reason: Option<String>,
}
