// src/handlers/facilities.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::facility::{FacilitiesResponse, OccupancyResponse},
};

#[utoipa::path(
    get,
    path = "/api/facilities",
    tag = "Facilities",
    responses(
        (status = 200, description = "Instalações disponíveis", body = FacilitiesResponse)
    )
)]
pub async fn list_facilities(State(app_state): State<AppState>) -> Result<Json<FacilitiesResponse>, AppError> {
    let facilities = app_state.facility_repo.list_all().await?;
    Ok(Json(FacilitiesResponse { facilities }))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{slug}/occupancy",
    tag = "Facilities",
    params(
        ("slug" = String, Path, description = "Slug da instalação")
    ),
    responses(
        (status = 200, description = "Ocupação neste instante", body = OccupancyResponse),
        (status = 404, description = "Instalação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_occupancy(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<Json<OccupancyResponse>, AppError> {
    let (facility, occupied) = app_state.booking_service.occupancy_now(&slug).await?;

    Ok(Json(OccupancyResponse { facility_slug: facility.slug, occupied }))
}
