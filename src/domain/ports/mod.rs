use crate::domain::models::{
    booking::{Booking, DisciplinePatch, Period},
    notification::{NotificationEvent, NotificationFeedItem, Role},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Storage contract for the booking collection. Pure storage: no
/// business validation happens here, with the single exception of the
/// slot guard in `create_if_slot_free`, which has to run inside the
/// store's own transaction to make check-then-create atomic.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking unless an undeclined booking already holds
    /// its (date, period) slot; fails with `SlotConflict` otherwise.
    async fn create_if_slot_free(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_by_slot(&self, date: NaiveDate, period: Period) -> Result<Vec<Booking>, AppError>;
    async fn list_by_discipline(&self, discipline: &str) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Sets `completion_date` on every booking of the discipline that
    /// does not already carry one. Returns the number of stamped rows.
    async fn stamp_completion(&self, discipline: &str, date: NaiveDate) -> Result<u64, AppError>;
    /// Clears `completion_date` across the discipline and moves every
    /// non-cancelled booking back to em-andamento.
    async fn clear_completion(&self, discipline: &str) -> Result<u64, AppError>;
    /// Bulk shallow patch over the discipline's bookings. A stored
    /// `completion_date` is never overwritten here.
    async fn update_discipline(
        &self,
        discipline: &str,
        patch: &DisciplinePatch,
    ) -> Result<u64, AppError>;
}

/// Per-(booking, role, event) read-flag store backing the unread badges.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Upserts the flag with `read = false`; a new occurrence of an
    /// already acknowledged event re-arms it.
    async fn arm(
        &self,
        booking_id: &str,
        role: Role,
        event: NotificationEvent,
    ) -> Result<(), AppError>;
    async fn list_unread(&self, role: Role) -> Result<Vec<NotificationFeedItem>, AppError>;
    async fn count_unread(&self, role: Role) -> Result<i64, AppError>;
    /// Explicit acknowledgement: flips every unread flag of the role.
    async fn mark_all_read(&self, role: Role) -> Result<u64, AppError>;
}
