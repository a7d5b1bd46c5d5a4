// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::users::get_me,
        handlers::users::list_users,

        // --- Facilities ---
        handlers::facilities::list_facilities,
        handlers::facilities::get_occupancy,

        // --- Bookings ---
        handlers::bookings::create_booking,
        handlers::bookings::list_active,

        // --- Tournaments ---
        handlers::tournaments::list_tournaments,
        handlers::tournaments::get_tournament,
        handlers::tournaments::create_tournament,
        handlers::tournaments::update_tournament,
        handlers::tournaments::delete_tournament,
        handlers::tournaments::report_score,
        handlers::tournaments::advance_round,

        // --- Invitations ---
        handlers::tournaments::my_invitations,
        handlers::tournaments::accept_invitation,
        handlers::tournaments::decline_invitation,
        handlers::tournaments::invite_user,
        handlers::tournaments::invite_users,

        // --- Admin ---
        handlers::admin::list_users,
        handlers::admin::list_bookings,
        handlers::admin::create_facility,
        handlers::admin::update_facility,
        handlers::admin::delete_facility,
        handlers::admin::grant_admin,
        handlers::admin::revoke_admin,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,

            // --- Auth ---
            models::auth::User,
            models::auth::UserSummary,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,
            models::auth::UsersResponse,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::SuccessResponse,

            // --- Facilities ---
            models::facility::Facility,
            models::facility::FacilityPayload,
            models::facility::FacilitiesResponse,
            models::facility::FacilityResponse,
            models::facility::OccupancyResponse,

            // --- Bookings ---
            models::booking::BookingStatus,
            models::booking::Booking,
            models::booking::ActiveBooking,
            models::booking::BookingOverview,
            models::booking::CreateBookingPayload,
            models::booking::BookingResponse,
            models::booking::ActiveBookingsResponse,
            models::booking::BookingsOverviewResponse,

            // --- Tournaments ---
            models::tournament::TournamentType,
            models::tournament::Match,
            models::tournament::Tournament,
            models::tournament::StandingEntry,
            models::tournament::TournamentDetail,
            models::tournament::TournamentResponse,
            models::tournament::TournamentsResponse,
            models::tournament::CreateTournamentPayload,
            models::tournament::UpdateTournamentPayload,
            models::tournament::ReportScorePayload,

            // --- Invitations ---
            models::tournament::InvitationStatus,
            models::tournament::TournamentInvitation,
            models::tournament::InvitationWithTournament,
            models::tournament::InvitationsResponse,
            models::tournament::MessageResponse,
            models::tournament::InviteUserPayload,
            models::tournament::InviteUsersPayload,
            models::tournament::InviteUsersResponse,
        )
    ),
    tags(
        (name = "Health", description = "Verificação de disponibilidade"),
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Diretório"),
        (name = "Facilities", description = "Instalações reserváveis e ocupação"),
        (name = "Bookings", description = "Reservas por intervalo de tempo"),
        (name = "Tournaments", description = "Torneios, tabelas de jogos e placares"),
        (name = "Invitations", description = "Convites para torneios"),
        (name = "Admin", description = "Administração (requer papel 'admin')")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
