pub mod auth;
pub mod booking;
pub mod facility;
pub mod rbac;
pub mod tournament;
