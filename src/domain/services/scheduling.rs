use crate::domain::models::booking::{Booking, Period};
use chrono::{Datelike, NaiveDate, Weekday};

/// Periods that exist on a given weekday. Recording runs Monday to
/// Friday; Friday has only the morning window.
pub fn allowed_periods(weekday: Weekday) -> &'static [Period] {
    match weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => {
            &[Period::Manha, Period::Tarde]
        }
        Weekday::Fri => &[Period::Manha],
        Weekday::Sat | Weekday::Sun => &[],
    }
}

pub fn period_allowed(date: NaiveDate, period: Period) -> bool {
    allowed_periods(date.weekday()).contains(&period)
}

/// The booking currently holding a slot, if any. Declined bookings are
/// skipped: a teacher denial frees the slot again.
pub fn occupant(slot_bookings: &[Booking]) -> Option<&Booking> {
    slot_bookings.iter().find(|b| b.occupies_slot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{NewBookingParams, TeacherConfirmation};

    #[test]
    fn friday_has_no_afternoon() {
        let friday = NaiveDate::from_ymd_opt(2024, 8, 23).unwrap();
        assert!(period_allowed(friday, Period::Manha));
        assert!(!period_allowed(friday, Period::Tarde));
    }

    #[test]
    fn weekends_have_no_periods() {
        let saturday = NaiveDate::from_ymd_opt(2024, 8, 24).unwrap();
        assert!(allowed_periods(saturday.weekday()).is_empty());
    }

    #[test]
    fn denied_booking_does_not_occupy() {
        let mut b = Booking::new(NewBookingParams {
            date: NaiveDate::from_ymd_opt(2024, 8, 19).unwrap(),
            period: Period::Manha,
            start_time: None,
            end_time: None,
            course: "Curso".into(),
            discipline: "Disciplina".into(),
            teacher: "Docente".into(),
            total_units: 8,
            recorded_units: 0,
        });

        assert!(occupant(std::slice::from_ref(&b)).is_some());
        b.teacher_confirmation = TeacherConfirmation::Negado;
        assert!(occupant(std::slice::from_ref(&b)).is_none());
    }
}
