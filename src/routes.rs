// src/routes.rs

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    let auth = || axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::users::get_me))
        .route("/", get(handlers::users::list_users))
        .layer(auth());

    // `route_layer` só protege o que foi registrado antes dele
    let facility_routes = Router::new()
        .route("/{slug}/occupancy", get(handlers::facilities::get_occupancy))
        .route_layer(auth())
        .route("/", get(handlers::facilities::list_facilities));

    let booking_routes = Router::new()
        .route("/", post(handlers::bookings::create_booking))
        .route("/active", get(handlers::bookings::list_active))
        .layer(auth());

    let tournament_public = Router::new()
        .route("/", get(handlers::tournaments::list_tournaments))
        .route("/{id}", get(handlers::tournaments::get_tournament));

    let tournament_protected = Router::new()
        .route("/", post(handlers::tournaments::create_tournament))
        .route(
            "/{id}",
            put(handlers::tournaments::update_tournament).delete(handlers::tournaments::delete_tournament),
        )
        .route("/{id}/rounds/{round}/matches/{index}", put(handlers::tournaments::report_score))
        .route("/{id}/rounds/{round}/advance", post(handlers::tournaments::advance_round))
        .route("/my-invitations", get(handlers::tournaments::my_invitations))
        .route(
            "/{id}/invitations/{invitation_id}/accept",
            post(handlers::tournaments::accept_invitation),
        )
        .route(
            "/{id}/invitations/{invitation_id}/decline",
            post(handlers::tournaments::decline_invitation),
        )
        .route("/invite", post(handlers::tournaments::invite_user))
        .route("/{id}/invite", post(handlers::tournaments::invite_users))
        .route_layer(auth());

    // Autenticação pelo middleware; o papel é checado pelo extrator `RequireRole`
    let admin_routes = Router::new()
        .route("/users", get(handlers::admin::list_users))
        .route("/bookings", get(handlers::admin::list_bookings))
        .route("/facilities", post(handlers::admin::create_facility))
        .route(
            "/facilities/{id}",
            put(handlers::admin::update_facility).delete(handlers::admin::delete_facility),
        )
        .route(
            "/users/{id}/admin",
            post(handlers::admin::grant_admin).delete(handlers::admin::revoke_admin),
        )
        .layer(auth());

    let cors = build_cors_layer(&app_state.config.cors_origin);

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/facilities", facility_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/tournaments", tournament_public.merge(tournament_protected))
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(cors)
        .with_state(app_state)
}

// Lista separada por vírgulas; origens inválidas são ignoradas
fn build_cors_layer(allowed: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Rota não encontrada." })))
}
