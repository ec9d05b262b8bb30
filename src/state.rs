use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{BookingRepository, NotificationRepository};
use crate::domain::services::lifecycle::BookingLifecycle;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub lifecycle: Arc<BookingLifecycle>,
}
