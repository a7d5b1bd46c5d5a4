// src/handlers/bookings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::booking::{ActiveBookingsResponse, BookingResponse, CreateBookingPayload},
};

#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva criada", body = BookingResponse),
        (status = 400, description = "Início ou duração inválidos"),
        (status = 404, description = "Instalação não encontrada"),
        (status = 409, description = "Intervalo já ocupado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateBookingPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Validação do payload (durationMin obrigatório e positivo)
    payload.validate()?;
    let duration_min = payload
        .duration_min
        .ok_or_else(|| AppError::InvalidInput("O campo 'durationMin' é obrigatório.".into()))?;

    // 2. Serviço (verificação + inserção atômicas)
    let booking = app_state
        .booking_service
        .create_booking(&payload.facility_slug, user.id, payload.start.as_deref(), duration_min)
        .await?;

    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

#[utoipa::path(
    get,
    path = "/api/bookings/active",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reservas em curso ou futuras", body = ActiveBookingsResponse),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_active(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ActiveBookingsResponse>, AppError> {
    let active = app_state.booking_service.list_active_bookings().await?;
    Ok(Json(ActiveBookingsResponse { active }))
}
