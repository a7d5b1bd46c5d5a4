// src/handlers/admin.rs
//
// Rotas administrativas. Todas exigem o papel 'admin' via `RequireRole<RoleAdmin>`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{RequireRole, RoleAdmin, RoleDef},
    models::{
        auth::UsersResponse,
        booking::BookingsOverviewResponse,
        facility::{FacilityPayload, FacilityResponse},
        rbac::SuccessResponse,
    },
};

type AdminOnly = RequireRole<RoleAdmin>;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "Usuários na ordem de cadastro", body = UsersResponse),
        (status = 403, description = "Requer administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
) -> Result<Json<UsersResponse>, AppError> {
    let users = app_state.user_repo.list_by_signup().await?;
    Ok(Json(UsersResponse { users }))
}

#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    tag = "Admin",
    responses(
        (status = 200, description = "Todas as reservas, mais recentes primeiro", body = BookingsOverviewResponse),
        (status = 403, description = "Requer administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
) -> Result<Json<BookingsOverviewResponse>, AppError> {
    let bookings = app_state.booking_service.list_all_bookings().await?;
    Ok(Json(BookingsOverviewResponse { bookings }))
}

#[utoipa::path(
    post,
    path = "/api/admin/facilities",
    tag = "Admin",
    request_body = FacilityPayload,
    responses(
        (status = 201, description = "Instalação criada", body = FacilityResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Slug já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_facility(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    WithRejection(Json(payload), _): WithRejection<Json<FacilityPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let facility = app_state
        .facility_repo
        .create(&payload.slug, payload.name.trim(), payload.icon.trim())
        .await?;

    tracing::info!("🏓 Instalação '{}' criada", facility.slug);
    Ok((StatusCode::CREATED, Json(FacilityResponse { facility })))
}

#[utoipa::path(
    put,
    path = "/api/admin/facilities/{id}",
    tag = "Admin",
    request_body = FacilityPayload,
    params(
        ("id" = Uuid, Path, description = "ID da instalação")
    ),
    responses(
        (status = 200, description = "Instalação atualizada", body = FacilityResponse),
        (status = 404, description = "Instalação não encontrada"),
        (status = 409, description = "Slug já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_facility(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<FacilityPayload>, AppError>,
) -> Result<Json<FacilityResponse>, AppError> {
    payload.validate()?;

    let facility = app_state
        .facility_repo
        .update(id, &payload.slug, payload.name.trim(), payload.icon.trim())
        .await?
        .ok_or(AppError::FacilityNotFound)?;

    Ok(Json(FacilityResponse { facility }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/facilities/{id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID da instalação")
    ),
    responses(
        (status = 200, description = "Instalação e suas reservas removidas", body = SuccessResponse),
        (status = 404, description = "Instalação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_facility(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    if app_state.facility_repo.delete(id).await? == 0 {
        return Err(AppError::FacilityNotFound);
    }

    tracing::info!("🗑️ Instalação {} removida", id);
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/admin",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID do usuário")
    ),
    responses(
        (status = 200, description = "Papel de administrador concedido", body = SuccessResponse),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn grant_admin(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    app_state.rbac_repo.grant_role(id, RoleAdmin::name()).await?;

    tracing::info!("🔑 Usuário {} promovido a administrador", id);
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}/admin",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID do usuário")
    ),
    responses(
        (status = 200, description = "Papel de administrador removido", body = SuccessResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn revoke_admin(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    app_state.rbac_repo.revoke_role(id, RoleAdmin::name()).await?;

    tracing::info!("🔑 Usuário {} deixou de ser administrador", id);
    Ok(Json(SuccessResponse::ok()))
}
