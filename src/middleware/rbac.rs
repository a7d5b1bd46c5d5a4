// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{common::error::AppError, config::AppState, models::auth::User};

/// 1. O Trait que define um papel exigido
pub trait RoleDef: Send + Sync + 'static {
    fn name() -> &'static str;
}

/// 2. O Extractor (Guardião). Depende do `auth_guard` ter rodado antes.
pub struct RequireRole<R>(pub PhantomData<R>);

// 3. Implementação do FromRequestParts
impl<R, S> FromRequestParts<S> for RequireRole<R>
where
    R: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Usuário autenticado
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        // B. Verifica no banco
        let required = R::name();
        let has_role = app_state.rbac_repo.user_has_role(user.id, required).await?;

        if !has_role {
            tracing::warn!("🔒 {} tentou acessar recurso restrito a '{}'", user.email, required);
            return Err(AppError::Forbidden(format!(
                "Você precisa do papel '{}' para realizar esta ação.",
                required
            )));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct RoleAdmin;
impl RoleDef for RoleAdmin {
    fn name() -> &'static str { "admin" }
}
