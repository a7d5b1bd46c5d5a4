pub mod admin;
pub mod auth;
pub mod bookings;
pub mod facilities;
pub mod health;
pub mod tournaments;
pub mod users;
