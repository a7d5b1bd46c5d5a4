pub mod auth;
pub mod booking_service;
pub mod schedule;
pub mod tournament_service;
