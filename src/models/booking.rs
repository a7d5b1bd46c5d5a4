// src/models/booking.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum BookingStatus {
    Occupied,  // Vira "occupied"
    Completed, // Vira "completed"
}

// Linha da tabela 'bookings'
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub facility_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
}

// Reserva ativa com dados do dono e da instalação (o que o calendário consulta)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBooking {
    pub id: Uuid,
    pub facility_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub user_email: String,
    pub facility_slug: String,
}

// Visão administrativa (histórico completo)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingOverview {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub user_email: String,
    pub facility_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    #[validate(length(min = 1, message = "O campo 'facilitySlug' é obrigatório."))]
    #[schema(example = "ps5")]
    pub facility_slug: String,

    // Sem início explícito a reserva começa agora
    #[schema(example = "2025-01-10T10:00:00Z")]
    pub start: Option<String>,

    #[validate(
        required(message = "O campo 'durationMin' é obrigatório."),
        range(min = 1, message = "A duração deve ser de pelo menos 1 minuto.")
    )]
    #[schema(example = 30)]
    pub duration_min: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub booking: Booking,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveBookingsResponse {
    pub active: Vec<ActiveBooking>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingsOverviewResponse {
    pub bookings: Vec<BookingOverview>,
}
