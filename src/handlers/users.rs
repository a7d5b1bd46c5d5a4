// src/handlers/users.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::{RoleAdmin, RoleDef}},
    models::auth::{MeResponse, UsersResponse},
};

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário autenticado e seus papéis", body = MeResponse),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MeResponse>, AppError> {
    let roles = app_state.rbac_repo.roles_for_user(user.id).await?;
    let is_admin = roles.iter().any(|r| r.name == RoleAdmin::name());

    Ok(Json(MeResponse { user, roles, is_admin }))
}

// Diretório de colegas, usado para escolher convidados
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Usuários cadastrados", body = UsersResponse),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<UsersResponse>, AppError> {
    let users = app_state.user_repo.list_directory().await?;
    Ok(Json(UsersResponse { users }))
}
