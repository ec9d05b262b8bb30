pub mod sqlite_booking_repo;
pub mod sqlite_notification_repo;
