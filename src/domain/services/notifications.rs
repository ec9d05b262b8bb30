use crate::domain::models::notification::{NotificationEvent, Role};

/// Which roles get their unread flag armed when an event fires.
/// A teacher denial notifies both sides; a cancellation notifies the
/// role that did not act; a finished upload is meant for the admin.
pub fn armed_roles(event: NotificationEvent) -> &'static [Role] {
    match event {
        NotificationEvent::TeacherDenial => &[Role::Admin, Role::Editor],
        NotificationEvent::EditorCancellation => &[Role::Admin],
        NotificationEvent::AdminCancellation => &[Role::Editor],
        NotificationEvent::UploadCompleted => &[Role::Admin],
    }
}

/// Event raised when `by` cancels a booking.
pub fn cancellation_event(by: Role) -> NotificationEvent {
    match by {
        Role::Editor => NotificationEvent::EditorCancellation,
        Role::Admin => NotificationEvent::AdminCancellation,
    }
}
