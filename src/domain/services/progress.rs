use crate::domain::models::booking::Booking;
use serde::Serialize;

/// Derived `{total, recorded}` pair for one discipline. Never stored:
/// bookings can be edited, cancelled or reassigned at any time, so a
/// durable counter would silently drift. Always re-derive from the
/// current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total_units: i64,
    pub recorded_units: i64,
}

impl Progress {
    pub fn percentage(&self) -> f64 {
        if self.total_units <= 0 {
            return 0.0;
        }
        let pct = self.recorded_units as f64 / self.total_units as f64 * 100.0;
        pct.min(100.0)
    }

    pub fn remaining(&self) -> i64 {
        (self.total_units - self.recorded_units).max(0)
    }

    pub fn is_complete(&self) -> bool {
        self.total_units > 0 && self.recorded_units >= self.total_units
    }
}

/// Reduces a snapshot to the discipline's progress. Only active
/// bookings count; `total_units` comes from the first active booking in
/// (created_at, id) order. A discipline with nothing active yields
/// `None` and appears in no progress view.
pub fn progress_for(bookings: &[Booking], discipline: &str) -> Option<Progress> {
    let mut matches: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.is_active() && b.discipline == discipline)
        .collect();

    matches.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

    let first = matches.first()?;
    let recorded_units = matches.iter().map(|b| b.contribution()).sum();

    Some(Progress {
        total_units: first.total_units,
        recorded_units,
    })
}

/// Units already recorded by every other active booking of the
/// discipline. Used by the unit-limit check so a booking can be edited
/// down and back up without being rejected against its own prior value.
pub fn recorded_by_others(bookings: &[Booking], discipline: &str, excluding_id: &str) -> i64 {
    bookings
        .iter()
        .filter(|b| b.is_active() && b.discipline == discipline && b.id != excluding_id)
        .map(|b| b.contribution())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{
        Booking, EditingStatus, NewBookingParams, Period, TeacherConfirmation,
    };
    use chrono::NaiveDate;

    fn booking(discipline: &str, total: i64, recorded: i64, day: u32) -> Booking {
        Booking::new(NewBookingParams {
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
            period: Period::Manha,
            start_time: None,
            end_time: None,
            course: "Curso".into(),
            discipline: discipline.into(),
            teacher: "Docente".into(),
            total_units: total,
            recorded_units: recorded,
        })
    }

    #[test]
    fn sums_active_contributions() {
        let mut a = booking("Algebra I", 10, 6, 19);
        let b = booking("Algebra I", 10, 4, 20);
        let other = booking("Banco de Dados", 8, 8, 21);

        let p = progress_for(&[a.clone(), b.clone(), other], "Algebra I").unwrap();
        assert_eq!(p, Progress { total_units: 10, recorded_units: 10 });
        assert_eq!(p.percentage(), 100.0);
        assert!(p.is_complete());

        // editor count takes precedence over the scheduler estimate
        a.lessons_recorded = Some(5);
        let p = progress_for(&[a, b], "Algebra I").unwrap();
        assert_eq!(p.recorded_units, 9);
        assert!(!p.is_complete());
    }

    #[test]
    fn declined_and_cancelled_bookings_do_not_count() {
        let mut declined = booking("Marketing I", 8, 4, 19);
        declined.teacher_confirmation = TeacherConfirmation::Negado;
        let mut cancelled = booking("Marketing I", 8, 4, 20);
        cancelled.status = EditingStatus::Cancelado;

        assert_eq!(progress_for(&[declined.clone(), cancelled.clone()], "Marketing I"), None);

        let active = booking("Marketing I", 8, 3, 21);
        let p = progress_for(&[declined, cancelled, active], "Marketing I").unwrap();
        assert_eq!(p.recorded_units, 3);
    }

    #[test]
    fn total_comes_from_first_created_booking() {
        let mut first = booking("História", 12, 2, 19);
        let later = booking("História", 99, 2, 20);
        first.created_at = later.created_at - chrono::Duration::hours(1);

        // list order must not matter
        let p = progress_for(&[later, first], "História").unwrap();
        assert_eq!(p.total_units, 12);
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let b = booking("Vazia", 0, 5, 19);
        let p = progress_for(&[b], "Vazia").unwrap();
        assert_eq!(p.percentage(), 0.0);
        assert!(!p.is_complete());
    }

    #[test]
    fn percentage_caps_at_one_hundred() {
        let b = booking("Cheia", 4, 9, 19);
        let p = progress_for(&[b], "Cheia").unwrap();
        assert_eq!(p.percentage(), 100.0);
    }

    #[test]
    fn recorded_by_others_excludes_own_contribution() {
        let a = booking("Física", 10, 6, 19);
        let b = booking("Física", 10, 4, 20);
        let own_id = a.id.clone();
        assert_eq!(recorded_by_others(&[a, b], "Física", &own_id), 4);
    }
}
