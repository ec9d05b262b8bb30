pub mod booking;
pub mod confirmation;
pub mod discipline;
pub mod health;
pub mod notification;
