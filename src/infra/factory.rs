use std::str::FromStr;
use std::sync::Arc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::domain::ports::{BookingRepository, NotificationRepository};
use crate::domain::services::lifecycle::BookingLifecycle;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo,
    sqlite_notification_repo::SqliteNotificationRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection...");

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite URL")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to connect to SQLite");

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    info!("Migrations applied");
    state_from_pool(config.clone(), pool)
}

/// Wires repositories and the lifecycle engine around an existing pool.
/// Tests call this directly with a throwaway database.
pub fn state_from_pool(config: Config, pool: SqlitePool) -> AppState {
    let booking_repo: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepo::new(pool.clone()));
    let notification_repo: Arc<dyn NotificationRepository> =
        Arc::new(SqliteNotificationRepo::new(pool));
    let lifecycle = Arc::new(BookingLifecycle::new(
        booking_repo.clone(),
        notification_repo.clone(),
    ));

    AppState {
        config,
        booking_repo,
        notification_repo,
        lifecycle,
    }
}
