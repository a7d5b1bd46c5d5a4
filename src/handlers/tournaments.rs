// src/handlers/tournaments.rs

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
    middleware::auth::AuthenticatedUser,
    models::{
        rbac::SuccessResponse,
        tournament::{
            CreateTournamentPayload, InvitationAnswer, InvitationsResponse, InviteUserPayload, InviteUsersPayload,
            InviteUsersResponse, MessageResponse, ReportScorePayload, TournamentResponse, TournamentsResponse,
            UpdateTournamentPayload,
        },
    },
};

#[utoipa::path(
    get,
    path = "/api/tournaments",
    tag = "Tournaments",
    responses(
        (status = 200, description = "Torneios, mais recentes primeiro", body = TournamentsResponse)
    )
)]
pub async fn list_tournaments(State(app_state): State<AppState>) -> Result<Json<TournamentsResponse>, AppError> {
    let tournaments = app_state.tournament_service.list_tournaments().await?;
    Ok(Json(TournamentsResponse { tournaments }))
}

#[utoipa::path(
    get,
    path = "/api/tournaments/{id}",
    tag = "Tournaments",
    params(
        ("id" = Uuid, Path, description = "ID do torneio")
    ),
    responses(
        (status = 200, description = "Torneio com classificação/campeão calculados", body = TournamentResponse),
        (status = 404, description = "Torneio não encontrado")
    )
)]
pub async fn get_tournament(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentResponse>, AppError> {
    let tournament = app_state.tournament_service.get_tournament(id).await?;
    Ok(Json(TournamentResponse { tournament }))
}

#[utoipa::path(
    post,
    path = "/api/tournaments",
    tag = "Tournaments",
    request_body = CreateTournamentPayload,
    responses(
        (status = 201, description = "Torneio criado com a tabela de jogos", body = TournamentResponse),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tournament(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateTournamentPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tournament = app_state
        .tournament_service
        .create_tournament(payload.name.trim(), payload.game.trim(), payload.kind, &payload.invited, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(TournamentResponse { tournament })))
}

#[utoipa::path(
    put,
    path = "/api/tournaments/{id}",
    tag = "Tournaments",
    request_body = UpdateTournamentPayload,
    params(
        ("id" = Uuid, Path, description = "ID do torneio")
    ),
    responses(
        (status = 200, description = "Torneio atualizado", body = TournamentResponse),
        (status = 404, description = "Torneio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tournament(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateTournamentPayload>, AppError>,
) -> Result<Json<TournamentResponse>, AppError> {
    payload.validate()?;

    let tournament = app_state
        .tournament_service
        .update_tournament(
            id,
            payload.name.as_deref(),
            payload.game.as_deref(),
            payload.matches.as_ref(),
            payload.standings.as_ref(),
        )
        .await?;

    Ok(Json(TournamentResponse { tournament }))
}

#[utoipa::path(
    delete,
    path = "/api/tournaments/{id}",
    tag = "Tournaments",
    params(
        ("id" = Uuid, Path, description = "ID do torneio")
    ),
    responses(
        (status = 200, description = "Torneio excluído", body = SuccessResponse),
        (status = 403, description = "Somente o criador pode excluir"),
        (status = 404, description = "Torneio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tournament(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    app_state.tournament_service.delete_tournament(id, user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    put,
    path = "/api/tournaments/{id}/rounds/{round}/matches/{index}",
    tag = "Tournaments",
    request_body = ReportScorePayload,
    params(
        ("id" = Uuid, Path, description = "ID do torneio"),
        ("round" = usize, Path, description = "Rodada (a partir de 0)"),
        ("index" = usize, Path, description = "Partida dentro da rodada (a partir de 0)")
    ),
    responses(
        (status = 200, description = "Placar gravado", body = TournamentResponse),
        (status = 400, description = "Placar inválido"),
        (status = 404, description = "Torneio ou partida não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn report_score(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, round, index)): Path<(Uuid, usize, usize)>,
    WithRejection(Json(payload), _): WithRejection<Json<ReportScorePayload>, AppError>,
) -> Result<Json<TournamentResponse>, AppError> {
    let tournament = app_state
        .tournament_service
        .report_score(id, round, index, payload.score1, payload.score2)
        .await?;

    Ok(Json(TournamentResponse { tournament }))
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/rounds/{round}/advance",
    tag = "Tournaments",
    params(
        ("id" = Uuid, Path, description = "ID do torneio"),
        ("round" = usize, Path, description = "Rodada cujos vencedores avançam")
    ),
    responses(
        (status = 200, description = "Vencedores levados à rodada seguinte", body = TournamentResponse),
        (status = 400, description = "Torneio não é mata-mata ou rodada é a final"),
        (status = 404, description = "Torneio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn advance_round(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, round)): Path<(Uuid, usize)>,
) -> Result<Json<TournamentResponse>, AppError> {
    let tournament = app_state.tournament_service.advance_round(id, round).await?;
    Ok(Json(TournamentResponse { tournament }))
}

#[utoipa::path(
    get,
    path = "/api/tournaments/my-invitations",
    tag = "Invitations",
    responses(
        (status = 200, description = "Convites pendentes do usuário", body = InvitationsResponse),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_invitations(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<InvitationsResponse>, AppError> {
    let invitations = app_state.tournament_service.list_my_invitations(user.id).await?;
    Ok(Json(InvitationsResponse { invitations }))
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/invitations/{invitation_id}/accept",
    tag = "Invitations",
    params(
        ("id" = Uuid, Path, description = "ID do torneio"),
        ("invitation_id" = Uuid, Path, description = "ID do convite")
    ),
    responses(
        (status = 200, description = "Convite aceito", body = MessageResponse),
        (status = 403, description = "O convite é de outro usuário"),
        (status = 404, description = "Convite não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn accept_invitation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, invitation_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    respond(&app_state, id, invitation_id, user.id, InvitationAnswer::Accept).await
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/invitations/{invitation_id}/decline",
    tag = "Invitations",
    params(
        ("id" = Uuid, Path, description = "ID do torneio"),
        ("invitation_id" = Uuid, Path, description = "ID do convite")
    ),
    responses(
        (status = 200, description = "Convite recusado", body = MessageResponse),
        (status = 403, description = "O convite é de outro usuário"),
        (status = 404, description = "Convite não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn decline_invitation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, invitation_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    respond(&app_state, id, invitation_id, user.id, InvitationAnswer::Decline).await
}

async fn respond(
    app_state: &AppState,
    tournament_id: Uuid,
    invitation_id: Uuid,
    user_id: Uuid,
    answer: InvitationAnswer,
) -> Result<Json<MessageResponse>, AppError> {
    let message = app_state
        .tournament_service
        .respond_invitation(tournament_id, invitation_id, user_id, answer)
        .await?;

    Ok(Json(MessageResponse { message: message.to_string() }))
}

#[utoipa::path(
    post,
    path = "/api/tournaments/invite",
    tag = "Invitations",
    request_body = InviteUserPayload,
    responses(
        (status = 200, description = "Usuário convidado", body = SuccessResponse),
        (status = 404, description = "Torneio ou usuário não encontrados"),
        (status = 409, description = "Usuário já convidado")
    ),
    security(("api_jwt" = []))
)]
pub async fn invite_user(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<InviteUserPayload>, AppError>,
) -> Result<Json<SuccessResponse>, AppError> {
    app_state
        .tournament_service
        .invite_user(payload.tournament_id, payload.user_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/invite",
    tag = "Invitations",
    request_body = InviteUsersPayload,
    params(
        ("id" = Uuid, Path, description = "ID do torneio")
    ),
    responses(
        (status = 200, description = "Usuários convidados agora", body = InviteUsersResponse),
        (status = 400, description = "Lista vazia"),
        (status = 404, description = "Torneio não encontrado"),
        (status = 409, description = "Todos já estavam convidados")
    ),
    security(("api_jwt" = []))
)]
pub async fn invite_users(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<InviteUsersPayload>, AppError>,
) -> Result<Json<InviteUsersResponse>, AppError> {
    payload.validate()?;

    let invited = app_state.tournament_service.invite_users(id, &payload.user_ids).await?;

    Ok(Json(InviteUsersResponse { success: true, invited }))
}
