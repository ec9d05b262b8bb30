use crate::domain::models::booking::{Booking, DisciplinePatch, Period};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_if_slot_free(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let occupying: Option<String> = sqlx::query_scalar(
            "SELECT id FROM bookings WHERE date = ? AND period = ? AND teacher_confirmation != 'NEGADO' LIMIT 1",
        )
        .bind(booking.date)
        .bind(booking.period)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if let Some(id) = occupying {
            return Err(AppError::SlotConflict {
                conflicting_booking_id: id,
            });
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, date, weekday, period, start_time, end_time, course, discipline, teacher,
                                   total_units, recorded_units, lessons_recorded, editor_notes, status,
                                   teacher_confirmation, confirmation_token, cancellation_kind, cancellation_reason,
                                   completion_date, all_recordings_done, upload_completed, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id).bind(booking.date).bind(&booking.weekday).bind(booking.period)
        .bind(&booking.start_time).bind(&booking.end_time).bind(&booking.course)
        .bind(&booking.discipline).bind(&booking.teacher).bind(booking.total_units)
        .bind(booking.recorded_units).bind(booking.lessons_recorded).bind(&booking.editor_notes)
        .bind(booking.status).bind(booking.teacher_confirmation).bind(&booking.confirmation_token)
        .bind(booking.cancellation_kind).bind(&booking.cancellation_reason).bind(booking.completion_date)
        .bind(booking.all_recordings_done).bind(booking.upload_completed).bind(booking.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE confirmation_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY date ASC, start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_slot(&self, date: NaiveDate, period: Period) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE date = ? AND period = ? ORDER BY created_at ASC",
        )
        .bind(date)
        .bind(period)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_discipline(&self, discipline: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE discipline = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(discipline)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET date=?, weekday=?, period=?, start_time=?, end_time=?, course=?, discipline=?,
                                 teacher=?, total_units=?, recorded_units=?, lessons_recorded=?, editor_notes=?,
                                 status=?, teacher_confirmation=?, cancellation_kind=?, cancellation_reason=?,
                                 completion_date=?, all_recordings_done=?, upload_completed=?
             WHERE id=?
             RETURNING *",
        )
        .bind(booking.date).bind(&booking.weekday).bind(booking.period).bind(&booking.start_time)
        .bind(&booking.end_time).bind(&booking.course).bind(&booking.discipline).bind(&booking.teacher)
        .bind(booking.total_units).bind(booking.recorded_units).bind(booking.lessons_recorded)
        .bind(&booking.editor_notes).bind(booking.status).bind(booking.teacher_confirmation)
        .bind(booking.cancellation_kind).bind(&booking.cancellation_reason).bind(booking.completion_date)
        .bind(booking.all_recordings_done).bind(booking.upload_completed)
        .bind(&booking.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn stamp_completion(&self, discipline: &str, date: NaiveDate) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET completion_date = ?
             WHERE discipline = ? AND completion_date IS NULL
               AND teacher_confirmation != 'NEGADO' AND status != 'cancelado'",
        )
        .bind(date)
        .bind(discipline)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }

    async fn clear_completion(&self, discipline: &str) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let cleared = sqlx::query("UPDATE bookings SET completion_date = NULL WHERE discipline = ?")
            .bind(discipline)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "UPDATE bookings SET status = 'em-andamento' WHERE discipline = ? AND status != 'cancelado'",
        )
        .bind(discipline)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cleared.rows_affected())
    }

    async fn update_discipline(
        &self,
        discipline: &str,
        patch: &DisciplinePatch,
    ) -> Result<u64, AppError> {
        // completion_date only fills in where still NULL: the first
        // completion wins until explicitly reverted.
        let result = sqlx::query(
            "UPDATE bookings SET
                 status = COALESCE(?, status),
                 all_recordings_done = COALESCE(?, all_recordings_done),
                 completion_date = CASE WHEN completion_date IS NULL THEN ? ELSE completion_date END
             WHERE discipline = ? AND teacher_confirmation != 'NEGADO' AND status != 'cancelado'",
        )
        .bind(patch.status)
        .bind(patch.all_recordings_done)
        .bind(patch.completion_date)
        .bind(discipline)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
