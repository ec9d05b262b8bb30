use crate::domain::models::notification::{NotificationEvent, NotificationFeedItem, Role};
use crate::domain::ports::NotificationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteNotificationRepo {
    pool: SqlitePool,
}

impl SqliteNotificationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepo {
    async fn arm(
        &self,
        booking_id: &str,
        role: Role,
        event: NotificationEvent,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO notification_reads (booking_id, role, event_type, read, armed_at)
             VALUES (?, ?, ?, 0, ?)
             ON CONFLICT(booking_id, role, event_type)
             DO UPDATE SET read = 0, armed_at = excluded.armed_at",
        )
        .bind(booking_id)
        .bind(role)
        .bind(event)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_unread(&self, role: Role) -> Result<Vec<NotificationFeedItem>, AppError> {
        sqlx::query_as::<_, NotificationFeedItem>(
            "SELECT n.booking_id, n.event_type, n.armed_at,
                    b.date, b.teacher, b.course, b.discipline, b.cancellation_reason
             FROM notification_reads n
             JOIN bookings b ON b.id = n.booking_id
             WHERE n.role = ? AND n.read = 0
             ORDER BY n.armed_at DESC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn count_unread(&self, role: Role) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notification_reads WHERE role = ? AND read = 0")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_all_read(&self, role: Role) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE notification_reads SET read = 1 WHERE role = ? AND read = 0")
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
