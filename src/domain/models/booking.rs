use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

/// Editing workflow state of a single booking. A purely informational
/// cycle driven by the editor; it does not gate aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum EditingStatus {
    #[sqlx(rename = "pendente")]
    #[serde(rename = "pendente")]
    Pendente,
    #[sqlx(rename = "em-andamento")]
    #[serde(rename = "em-andamento")]
    EmAndamento,
    #[sqlx(rename = "concluída")]
    #[serde(rename = "concluída")]
    Concluida,
    #[sqlx(rename = "cancelado")]
    #[serde(rename = "cancelado")]
    Cancelado,
}

impl EditingStatus {
    /// Next state in the editor's manual display cycle
    /// (pendente → em-andamento → concluída → pendente).
    pub fn advanced(self) -> Option<Self> {
        match self {
            EditingStatus::Pendente => Some(EditingStatus::EmAndamento),
            EditingStatus::EmAndamento => Some(EditingStatus::Concluida),
            EditingStatus::Concluida => Some(EditingStatus::Pendente),
            EditingStatus::Cancelado => None,
        }
    }
}

/// Teacher's response through the one-time confirmation link.
/// Terminal once set to anything but `Pendente`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TeacherConfirmation {
    Pendente,
    Confirmado,
    Negado,
}

/// Time window of a recording day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Period {
    #[sqlx(rename = "MANHÃ")]
    #[serde(rename = "MANHÃ")]
    Manha,
    #[sqlx(rename = "TARDE")]
    #[serde(rename = "TARDE")]
    Tarde,
}

impl Period {
    /// Default wall-clock window for the period, used when the caller
    /// does not supply explicit times.
    pub fn default_window(self) -> (&'static str, &'static str) {
        match self {
            Period::Manha => ("09:00", "12:00"),
            Period::Tarde => ("13:30", "17:30"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CancellationKind {
    TeacherDeclined,
    EditorCancelled,
    AdminCancelled,
}

/// The three cancellation paths, kept as one tagged value so a booking
/// can never carry contradictory combinations (e.g. an editor
/// cancellation together with a teacher denial).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cancellation {
    TeacherDeclined { reason: Option<String> },
    EditorCancelled { reason: String },
    AdminCancelled { reason: String },
}

impl Cancellation {
    pub fn kind(&self) -> CancellationKind {
        match self {
            Cancellation::TeacherDeclined { .. } => CancellationKind::TeacherDeclined,
            Cancellation::EditorCancelled { .. } => CancellationKind::EditorCancelled,
            Cancellation::AdminCancelled { .. } => CancellationKind::AdminCancelled,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Cancellation::TeacherDeclined { reason } => reason.as_deref(),
            Cancellation::EditorCancelled { reason } | Cancellation::AdminCancelled { reason } => {
                Some(reason)
            }
        }
    }
}

/// One scheduled recording session for a discipline at a (date, period)
/// slot. The only persisted entity.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub date: NaiveDate,
    pub weekday: String,
    pub period: Period,
    pub start_time: String,
    pub end_time: String,
    pub course: String,
    pub discipline: String,
    pub teacher: String,
    pub total_units: i64,
    pub recorded_units: i64,
    pub lessons_recorded: Option<i64>,
    pub editor_notes: Option<String>,
    pub status: EditingStatus,
    pub teacher_confirmation: TeacherConfirmation,
    pub confirmation_token: String,
    pub cancellation_kind: Option<CancellationKind>,
    pub cancellation_reason: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub all_recordings_done: bool,
    pub upload_completed: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub date: NaiveDate,
    pub period: Period,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub course: String,
    pub discipline: String,
    pub teacher: String,
    pub total_units: i64,
    pub recorded_units: i64,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let (default_start, default_end) = params.period.default_window();

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            weekday: weekday_name(params.date.weekday()).to_string(),
            date: params.date,
            period: params.period,
            start_time: params.start_time.unwrap_or_else(|| default_start.to_string()),
            end_time: params.end_time.unwrap_or_else(|| default_end.to_string()),
            course: params.course,
            discipline: params.discipline,
            teacher: params.teacher,
            total_units: params.total_units,
            recorded_units: params.recorded_units,
            lessons_recorded: None,
            editor_notes: None,
            status: EditingStatus::Pendente,
            teacher_confirmation: TeacherConfirmation::Pendente,
            confirmation_token: token,
            cancellation_kind: None,
            cancellation_reason: None,
            completion_date: None,
            all_recordings_done: false,
            upload_completed: false,
            created_at: Utc::now(),
        }
    }

    /// Units this booking contributes to its discipline's aggregate.
    /// The editor-entered count wins over the scheduler's estimate.
    pub fn contribution(&self) -> i64 {
        self.lessons_recorded.unwrap_or(self.recorded_units)
    }

    /// A declined slot is free again; everything else occupies it.
    pub fn occupies_slot(&self) -> bool {
        self.teacher_confirmation != TeacherConfirmation::Negado
    }

    /// Active bookings are the ones that count towards progress:
    /// not declined by the teacher and not cancelled.
    pub fn is_active(&self) -> bool {
        self.occupies_slot() && self.status != EditingStatus::Cancelado
    }

    pub fn cancellation(&self) -> Option<Cancellation> {
        match self.cancellation_kind? {
            CancellationKind::TeacherDeclined => Some(Cancellation::TeacherDeclined {
                reason: self.cancellation_reason.clone(),
            }),
            CancellationKind::EditorCancelled => Some(Cancellation::EditorCancelled {
                reason: self.cancellation_reason.clone().unwrap_or_default(),
            }),
            CancellationKind::AdminCancelled => Some(Cancellation::AdminCancelled {
                reason: self.cancellation_reason.clone().unwrap_or_default(),
            }),
        }
    }

    /// Shallow merge. Changing the date also refreshes the stored
    /// weekday name.
    pub fn apply(&mut self, patch: &BookingPatch) {
        if let Some(date) = patch.date {
            self.date = date;
            self.weekday = weekday_name(date.weekday()).to_string();
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(ref start_time) = patch.start_time {
            self.start_time = start_time.clone();
        }
        if let Some(ref end_time) = patch.end_time {
            self.end_time = end_time.clone();
        }
        if let Some(ref course) = patch.course {
            self.course = course.clone();
        }
        if let Some(ref discipline) = patch.discipline {
            self.discipline = discipline.clone();
        }
        if let Some(ref teacher) = patch.teacher {
            self.teacher = teacher.clone();
        }
        if let Some(total_units) = patch.total_units {
            self.total_units = total_units;
        }
        if let Some(recorded_units) = patch.recorded_units {
            self.recorded_units = recorded_units;
        }
        if let Some(lessons_recorded) = patch.lessons_recorded {
            self.lessons_recorded = lessons_recorded;
        }
        if let Some(ref editor_notes) = patch.editor_notes {
            self.editor_notes = Some(editor_notes.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(all_recordings_done) = patch.all_recordings_done {
            self.all_recordings_done = all_recordings_done;
        }
        if let Some(upload_completed) = patch.upload_completed {
            self.upload_completed = upload_completed;
        }
    }

    pub fn set_cancellation(&mut self, cancellation: Cancellation) {
        self.cancellation_kind = Some(cancellation.kind());
        self.cancellation_reason = cancellation.reason().map(str::to_string);
    }
}

/// Shallow merge patch for a single booking. Absent fields keep their
/// stored value; concurrent patches are last-write-wins per field.
/// `lessons_recorded` is double-wrapped so an explicit `null` clears
/// the editor count back to the scheduler's estimate.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookingPatch {
    pub date: Option<NaiveDate>,
    pub period: Option<Period>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub course: Option<String>,
    pub discipline: Option<String>,
    pub teacher: Option<String>,
    pub total_units: Option<i64>,
    pub recorded_units: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub lessons_recorded: Option<Option<i64>>,
    pub editor_notes: Option<String>,
    pub status: Option<EditingStatus>,
    pub all_recordings_done: Option<bool>,
    pub upload_completed: Option<bool>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// Bulk patch applied to every booking of a discipline. An already set
/// `completion_date` is preserved (first completion wins); clearing it
/// goes through the dedicated revert operation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DisciplinePatch {
    pub status: Option<EditingStatus>,
    pub all_recordings_done: Option<bool>,
    pub completion_date: Option<NaiveDate>,
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Booking {
        Booking::new(NewBookingParams {
            date: NaiveDate::from_ymd_opt(2024, 8, 19).unwrap(),
            period: Period::Manha,
            start_time: None,
            end_time: None,
            course: "Engenharia de Software".into(),
            discipline: "Introdução à Programação".into(),
            teacher: "Dr. Alan Turing".into(),
            total_units: 10,
            recorded_units: 4,
        })
    }

    #[test]
    fn new_booking_defaults() {
        let b = sample();
        assert_eq!(b.weekday, "Segunda-feira");
        assert_eq!(b.start_time, "09:00");
        assert_eq!(b.end_time, "12:00");
        assert_eq!(b.status, EditingStatus::Pendente);
        assert_eq!(b.teacher_confirmation, TeacherConfirmation::Pendente);
        assert_eq!(b.confirmation_token.len(), 32);
        assert!(b.is_active());
    }

    #[test]
    fn status_cycle_wraps_and_skips_cancelled() {
        assert_eq!(EditingStatus::Pendente.advanced(), Some(EditingStatus::EmAndamento));
        assert_eq!(EditingStatus::EmAndamento.advanced(), Some(EditingStatus::Concluida));
        assert_eq!(EditingStatus::Concluida.advanced(), Some(EditingStatus::Pendente));
        assert_eq!(EditingStatus::Cancelado.advanced(), None);
    }

    #[test]
    fn contribution_prefers_editor_count() {
        let mut b = sample();
        assert_eq!(b.contribution(), 4);
        b.lessons_recorded = Some(6);
        assert_eq!(b.contribution(), 6);
    }

    #[test]
    fn cancellation_round_trips_through_columns() {
        let mut b = sample();
        b.set_cancellation(Cancellation::EditorCancelled { reason: "sem material".into() });
        assert_eq!(b.cancellation_kind, Some(CancellationKind::EditorCancelled));
        assert_eq!(
            b.cancellation(),
            Some(Cancellation::EditorCancelled { reason: "sem material".into() })
        );

        b.set_cancellation(Cancellation::TeacherDeclined { reason: None });
        assert_eq!(b.cancellation(), Some(Cancellation::TeacherDeclined { reason: None }));
    }

    #[test]
    fn patch_refreshes_weekday() {
        let mut b = sample();
        b.apply(&BookingPatch {
            date: Some(NaiveDate::from_ymd_opt(2024, 8, 20).unwrap()),
            ..Default::default()
        });
        assert_eq!(b.weekday, "Terça-feira");
    }

    #[test]
    fn patch_distinguishes_null_from_absent_editor_count() {
        let mut b = sample();
        b.lessons_recorded = Some(2);

        // Absent field: the stored count stays.
        let patch: BookingPatch =
            serde_json::from_value(serde_json::json!({ "editor_notes": "ok" })).unwrap();
        b.apply(&patch);
        assert_eq!(b.lessons_recorded, Some(2));

        // Explicit null: back to the scheduler's estimate.
        let patch: BookingPatch =
            serde_json::from_value(serde_json::json!({ "lessons_recorded": null })).unwrap();
        b.apply(&patch);
        assert_eq!(b.lessons_recorded, None);
        assert_eq!(b.contribution(), 4);
    }

    #[test]
    fn declined_booking_frees_slot_but_stays_in_history() {
        let mut b = sample();
        b.teacher_confirmation = TeacherConfirmation::Negado;
        assert!(!b.occupies_slot());
        assert!(!b.is_active());
        assert_eq!(b.status, EditingStatus::Pendente);
    }
}
