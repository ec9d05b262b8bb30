use crate::domain::models::booking::{
    Booking, BookingPatch, Cancellation, DisciplinePatch, EditingStatus, NewBookingParams, Period,
    TeacherConfirmation,
};
use crate::domain::models::notification::{NotificationEvent, Role};
use crate::domain::ports::{BookingRepository, NotificationRepository};
use crate::domain::services::notifications::{armed_roles, cancellation_event};
use crate::domain::services::progress::{progress_for, recorded_by_others, Progress};
use crate::domain::services::scheduling;
use crate::error::AppError;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

/// Governs every legal transition of a booking and the side effects a
/// transition must produce: slot and unit-limit validation, cancellation
/// records, unread-flag arming and the discipline completion sweep.
/// Readers go through the pure services; this type is the only writer.
pub struct BookingLifecycle {
    bookings: Arc<dyn BookingRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl BookingLifecycle {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            bookings,
            notifications,
        }
    }

    pub async fn create(&self, mut params: NewBookingParams) -> Result<Booking, AppError> {
        if params.teacher.trim().is_empty()
            || params.course.trim().is_empty()
            || params.discipline.trim().is_empty()
        {
            return Err(AppError::Validation(
                "teacher, course and discipline are required".into(),
            ));
        }
        if params.total_units < 0 || params.recorded_units < 0 {
            return Err(AppError::Validation("units cannot be negative".into()));
        }
        if !scheduling::period_allowed(params.date, params.period) {
            return Err(AppError::Validation(format!(
                "period is not available on {}",
                params.date
            )));
        }

        let snapshot = self.bookings.list_by_discipline(&params.discipline).await?;
        if let Some(progress) = progress_for(&snapshot, &params.discipline) {
            if progress.is_complete() {
                return Err(AppError::DisciplineComplete(params.discipline));
            }
            if params.recorded_units > progress.remaining() {
                return Err(AppError::UnitLimitExceeded {
                    discipline: params.discipline,
                    remaining_units: progress.remaining(),
                    total_units: progress.total_units,
                });
            }
            // The first booking of a discipline fixed its total; later
            // bookings inherit it regardless of what the caller sent.
            params.total_units = progress.total_units;
        } else if params.total_units > 0 && params.recorded_units > params.total_units {
            // No prior progress: the booking is still bounded by the
            // total it declares for the discipline.
            return Err(AppError::UnitLimitExceeded {
                discipline: params.discipline,
                remaining_units: params.total_units,
                total_units: params.total_units,
            });
        }

        let booking = Booking::new(params);
        let created = self.bookings.create_if_slot_free(&booking).await?;
        info!(
            "Booking created: {} for {} on {} ({:?})",
            created.id, created.discipline, created.date, created.period
        );

        self.sweep_completion(&created.discipline).await?;
        self.bookings
            .find_by_id(&created.id)
            .await?
            .ok_or(AppError::Internal)
    }

    /// Shallow merge patch. Validation happens against the merged state
    /// before anything is written, so a rejected patch leaves the store
    /// untouched.
    pub async fn update(&self, id: &str, patch: BookingPatch) -> Result<Booking, AppError> {
        if patch.status == Some(EditingStatus::Cancelado) {
            return Err(AppError::Validation(
                "use the cancel operation to cancel a booking".into(),
            ));
        }

        let current = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        let mut updated = current.clone();
        updated.apply(&patch);

        if updated.date != current.date || updated.period != current.period {
            if !scheduling::period_allowed(updated.date, updated.period) {
                return Err(AppError::Validation(format!(
                    "period is not available on {}",
                    updated.date
                )));
            }
            let slot = self.bookings.list_by_slot(updated.date, updated.period).await?;
            if let Some(existing) = scheduling::occupant(&slot) {
                if existing.id != updated.id {
                    return Err(AppError::SlotConflict {
                        conflicting_booking_id: existing.id.clone(),
                    });
                }
            }
        }

        if updated.is_active() {
            self.check_unit_limit(&updated).await?;
        }

        let upload_just_completed = !current.upload_completed && updated.upload_completed;

        let saved = self.bookings.update(&updated).await?;

        if upload_just_completed {
            self.arm(&saved.id, NotificationEvent::UploadCompleted).await?;
            info!("Upload delivered for booking {}", saved.id);
        }

        self.sweep_completion(&saved.discipline).await?;
        self.bookings
            .find_by_id(&saved.id)
            .await?
            .ok_or(AppError::Internal)
    }

    /// Editor's manual display cycle: pendente → em-andamento →
    /// concluída → pendente. Independent from discipline completion.
    pub async fn advance_status(&self, id: &str) -> Result<Booking, AppError> {
        let mut booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        let next = booking
            .status
            .advanced()
            .ok_or_else(|| AppError::Conflict("Cancelled bookings have no status cycle".into()))?;
        booking.status = next;

        self.bookings.update(&booking).await
    }

    pub async fn confirm(&self, token: &str) -> Result<Booking, AppError> {
        let mut booking = self.find_pending_confirmation(token).await?;
        booking.teacher_confirmation = TeacherConfirmation::Confirmado;
        let saved = self.bookings.update(&booking).await?;
        info!("Booking {} confirmed by teacher {}", saved.id, saved.teacher);
        Ok(saved)
    }

    /// Terminal denial: records the TeacherDeclined cancellation, frees
    /// the slot (the occupancy predicate skips NEGADO) and arms the
    /// unread flag of both roles. The edit status stays pendente so the
    /// row remains visible in history.
    pub async fn deny(&self, token: &str, reason: Option<String>) -> Result<Booking, AppError> {
        let mut booking = self.find_pending_confirmation(token).await?;
        booking.teacher_confirmation = TeacherConfirmation::Negado;
        booking.set_cancellation(Cancellation::TeacherDeclined {
            reason: reason.filter(|r| !r.trim().is_empty()),
        });

        let saved = self.bookings.update(&booking).await?;
        self.arm(&saved.id, NotificationEvent::TeacherDenial).await?;
        info!(
            "Booking {} declined by teacher {} ({})",
            saved.id,
            saved.teacher,
            saved.cancellation_reason.as_deref().unwrap_or("no reason given")
        );
        Ok(saved)
    }

    pub async fn cancel(&self, id: &str, by: Role, reason: String) -> Result<Booking, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation("cancellation reason is required".into()));
        }

        let mut booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if booking.status == EditingStatus::Cancelado {
            return Err(AppError::Conflict("Booking is already cancelled".into()));
        }
        if booking.teacher_confirmation == TeacherConfirmation::Negado {
            return Err(AppError::Conflict(
                "Booking was already declined by the teacher".into(),
            ));
        }

        booking.status = EditingStatus::Cancelado;
        booking.set_cancellation(match by {
            Role::Editor => Cancellation::EditorCancelled { reason },
            Role::Admin => Cancellation::AdminCancelled { reason },
        });

        let saved = self.bookings.update(&booking).await?;
        self.arm(&saved.id, cancellation_event(by)).await?;
        info!("Booking {} cancelled by {:?}", saved.id, by);
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.bookings.delete(id).await?;
        info!("Booking removed: {}", id);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn get_by_token(&self, token: &str) -> Result<Booking, AppError> {
        self.bookings
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn list(&self) -> Result<Vec<Booking>, AppError> {
        self.bookings.list_all().await
    }

    pub async fn find_by_slot(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> Result<Option<Booking>, AppError> {
        let slot = self.bookings.list_by_slot(date, period).await?;
        Ok(scheduling::occupant(&slot).cloned())
    }

    /// Re-derived from the current snapshot on every call.
    pub async fn progress(&self, discipline: &str) -> Result<Option<Progress>, AppError> {
        let snapshot = self.bookings.list_by_discipline(discipline).await?;
        Ok(progress_for(&snapshot, discipline))
    }

    pub async fn update_discipline(
        &self,
        discipline: &str,
        patch: &DisciplinePatch,
    ) -> Result<u64, AppError> {
        let updated = self.bookings.update_discipline(discipline, patch).await?;
        info!("Discipline {} bulk-updated ({} bookings)", discipline, updated);
        Ok(updated)
    }

    /// Clears the discipline-level completion stamp and moves its
    /// bookings back to em-andamento so corrections can be recorded.
    /// Reaching 100% afterwards stamps a fresh completion date.
    pub async fn revert_completion(&self, discipline: &str) -> Result<u64, AppError> {
        let reverted = self.bookings.clear_completion(discipline).await?;
        if reverted == 0 {
            return Err(AppError::NotFound(format!("Discipline not found: {discipline}")));
        }
        info!("Completion reverted for discipline {}", discipline);
        Ok(reverted)
    }

    /// Unit-limit check against the merged state: the capacity taken by
    /// everyone else, plus the booking's own new contribution, may not
    /// exceed the discipline total. Measuring "others" instead of the
    /// whole aggregate lets a booking be edited down and back up.
    async fn check_unit_limit(&self, updated: &Booking) -> Result<(), AppError> {
        let snapshot = self.bookings.list_by_discipline(&updated.discipline).await?;
        let others = recorded_by_others(&snapshot, &updated.discipline, &updated.id);

        let mut hypothetical: Vec<Booking> =
            snapshot.into_iter().filter(|b| b.id != updated.id).collect();
        hypothetical.push(updated.clone());

        if let Some(progress) = progress_for(&hypothetical, &updated.discipline) {
            if progress.total_units > 0 && progress.recorded_units > progress.total_units {
                return Err(AppError::UnitLimitExceeded {
                    discipline: updated.discipline.clone(),
                    remaining_units: (progress.total_units - others).max(0),
                    total_units: progress.total_units,
                });
            }
        }
        Ok(())
    }

    /// First-write-wins completion stamp: runs after every mutation that
    /// can move a discipline's aggregate, stamps today once the
    /// aggregate reaches the total and no booking carries a date yet.
    async fn sweep_completion(&self, discipline: &str) -> Result<(), AppError> {
        let snapshot = self.bookings.list_by_discipline(discipline).await?;
        let Some(progress) = progress_for(&snapshot, discipline) else {
            return Ok(());
        };
        if !progress.is_complete() {
            return Ok(());
        }
        if snapshot.iter().any(|b| b.completion_date.is_some()) {
            return Ok(());
        }

        let stamped = self
            .bookings
            .stamp_completion(discipline, Utc::now().date_naive())
            .await?;
        info!(
            "Discipline {} reached 100% ({}/{}), completion stamped on {} bookings",
            discipline, progress.recorded_units, progress.total_units, stamped
        );
        Ok(())
    }

    async fn find_pending_confirmation(&self, token: &str) -> Result<Booking, AppError> {
        let booking = self.get_by_token(token).await?;
        if booking.status == EditingStatus::Cancelado {
            return Err(AppError::Conflict("Booking has been cancelled".into()));
        }
        if booking.teacher_confirmation != TeacherConfirmation::Pendente {
            return Err(AppError::Conflict("Confirmation already recorded".into()));
        }
        Ok(booking)
    }

    async fn arm(&self, booking_id: &str, event: NotificationEvent) -> Result<(), AppError> {
        for role in armed_roles(event) {
            self.notifications.arm(booking_id, *role, event).await?;
        }
        Ok(())
    }
}
