pub mod defaults;
pub mod lifecycle;
pub mod notifications;
pub mod progress;
pub mod scheduling;
