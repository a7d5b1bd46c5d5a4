// src/services/tournament_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InvitationRepository, TournamentRepository},
    models::tournament::{
        participant_list, InvitationAnswer, InvitationWithTournament, ManualStandings, Match, Rounds, Tournament,
        TournamentDetail, TournamentInvitation, TournamentType,
    },
    services::schedule,
};

#[derive(Clone)]
pub struct TournamentService {
    tournament_repo: TournamentRepository,
    invitation_repo: InvitationRepository,
    pool: PgPool,
}

impl TournamentService {
    pub fn new(tournament_repo: TournamentRepository, invitation_repo: InvitationRepository, pool: PgPool) -> Self {
        Self { tournament_repo, invitation_repo, pool }
    }

    /// Cria o torneio com a tabela gerada e os convites pendentes, tudo numa transação.
    pub async fn create_tournament(
        &self,
        name: &str,
        game: &str,
        kind: TournamentType,
        invited: &[Uuid],
        creator: Uuid,
    ) -> Result<TournamentDetail, AppError> {
        // 1. Participantes: criador primeiro, sem repetições
        let participants = participant_list(creator, invited);
        let players = i32::try_from(participants.len())
            .map_err(|_| AppError::InvalidInput("Participantes demais para um torneio.".into()))?;

        // 2. Tabela de jogos (o rng não atravessa nenhum .await)
        let matches = schedule::generate(kind, &participants, &mut rand::rng());

        // 3. Torneio + convites
        let invitees: Vec<Uuid> = participants[1..].to_vec();

        let mut tx = self.pool.begin().await?;

        let tournament = self.tournament_repo
            .create(&mut *tx, name, game, players, kind, &invitees, &matches, creator)
            .await?;

        if !invitees.is_empty() {
            self.invitation_repo
                .create_pending(&mut *tx, tournament.id, &invitees)
                .await
                .map_err(|e| match e {
                    AppError::UserNotFound => {
                        AppError::InvalidInput("A lista de convidados tem um usuário inexistente.".into())
                    }
                    other => other,
                })?;
        }

        tx.commit().await?;

        tracing::info!(
            "🏆 Torneio '{}' ({:?}) criado com {} participante(s) e {} rodada(s)",
            tournament.name, tournament.kind, players, tournament.matches.0.len()
        );
        Ok(detail(tournament))
    }

    pub async fn list_tournaments(&self) -> Result<Vec<Tournament>, AppError> {
        self.tournament_repo.list_all().await
    }

    pub async fn get_tournament(&self, id: Uuid) -> Result<TournamentDetail, AppError> {
        let tournament = self.tournament_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::TournamentNotFound)?;
        Ok(detail(tournament))
    }

    /// Patch parcial: campos ausentes ficam como estão.
    pub async fn update_tournament(
        &self,
        id: Uuid,
        name: Option<&str>,
        game: Option<&str>,
        matches: Option<&Rounds>,
        standings: Option<&ManualStandings>,
    ) -> Result<TournamentDetail, AppError> {
        let tournament = self.tournament_repo
            .update_fields(&self.pool, id, name, game, matches, standings)
            .await?
            .ok_or(AppError::TournamentNotFound)?;
        Ok(detail(tournament))
    }

    pub async fn delete_tournament(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let tournament = self.tournament_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::TournamentNotFound)?;

        if tournament.created_by != user_id {
            return Err(AppError::NotTournamentCreator);
        }

        self.tournament_repo.delete(id).await?;
        tracing::info!("🗑️ Torneio {} excluído pelo criador", id);
        Ok(())
    }

    /// Grava o placar de uma única partida com o torneio travado.
    /// `None` mantém o valor gravado; `Some(None)` limpa o campo.
    pub async fn report_score(
        &self,
        id: Uuid,
        round: usize,
        index: usize,
        score1: Option<Option<i64>>,
        score2: Option<Option<i64>>,
    ) -> Result<TournamentDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut tournament = self.tournament_repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::TournamentNotFound)?;

        let m = tournament.matches.0
            .get_mut(round)
            .and_then(|r| r.get_mut(index))
            .ok_or(AppError::MatchNotFound { round, index })?;
        apply_scores(m, score1, score2)?;

        let updated = self.tournament_repo
            .update_matches(&mut *tx, id, &tournament.matches.0)
            .await?;

        tx.commit().await?;
        Ok(detail(updated))
    }

    /// Leva os vencedores da rodada `round` para a seguinte (só mata-mata).
    pub async fn advance_round(&self, id: Uuid, round: usize) -> Result<TournamentDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut tournament = self.tournament_repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::TournamentNotFound)?;

        if tournament.kind != TournamentType::Elimination {
            return Err(AppError::InvalidInput(
                "Somente torneios de mata-mata avançam vencedores.".into(),
            ));
        }

        schedule::advance_winners(&mut tournament.matches.0, round)?;

        let updated = self.tournament_repo
            .update_matches(&mut *tx, id, &tournament.matches.0)
            .await?;

        tx.commit().await?;

        tracing::info!("⏭️ Torneio {}: vencedores da rodada {} avançaram", id, round);
        Ok(detail(updated))
    }

    pub async fn list_my_invitations(&self, user_id: Uuid) -> Result<Vec<InvitationWithTournament>, AppError> {
        self.invitation_repo.list_pending_for_user(user_id).await
    }

    /// Aceita ou recusa um convite. A tabela de jogos não muda.
    pub async fn respond_invitation(
        &self,
        tournament_id: Uuid,
        invitation_id: Uuid,
        user_id: Uuid,
        answer: InvitationAnswer,
    ) -> Result<&'static str, AppError> {
        let invitation = self.invitation_repo
            .find_by_id(invitation_id)
            .await?
            .filter(|inv| inv.tournament_id == tournament_id)
            .ok_or(AppError::InvitationNotFound)?;

        if invitation.user_id != user_id {
            return Err(AppError::NotYourInvitation);
        }

        self.invitation_repo.respond(invitation.id, answer.status()).await?;

        tracing::info!("✉️ Convite {} respondido: {:?}", invitation.id, answer);
        Ok(answer.message())
    }

    /// Convite avulso de um usuário.
    pub async fn invite_user(&self, tournament_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let invited = self.invite_users(tournament_id, &[user_id]).await;
        match invited {
            Err(AppError::AllAlreadyInvited) => Err(AppError::AlreadyInvited),
            other => other.map(|_| ()),
        }
    }

    /// Convida em massa, ignorando quem já tem convite. Devolve os IDs convidados agora.
    pub async fn invite_users(&self, tournament_id: Uuid, user_ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.tournament_repo.exists(&mut *tx, tournament_id).await? {
            return Err(AppError::TournamentNotFound);
        }

        // ON CONFLICT resolve pedidos concorrentes para o mesmo usuário
        let requested = unique_in_order(user_ids);
        let created = self.invitation_repo
            .create_pending(&mut *tx, tournament_id, &requested)
            .await?;

        let invited = newly_invited(&requested, &created);
        if invited.is_empty() {
            return Err(AppError::AllAlreadyInvited);
        }

        tx.commit().await?;

        tracing::info!("✉️ {} convite(s) enviados para o torneio {}", invited.len(), tournament_id);
        Ok(invited)
    }
}

/// Anexa a classificação (campeonato) ou o campeão (mata-mata) calculados.
pub fn detail(tournament: Tournament) -> TournamentDetail {
    let (auto_standings, winner) = match tournament.kind {
        TournamentType::Championship => (
            schedule::championship_standings(&tournament.participants(), &tournament.matches.0),
            None,
        ),
        TournamentType::Elimination => (Vec::new(), schedule::elimination_winner(&tournament.matches.0)),
    };
    TournamentDetail { tournament, auto_standings, winner }
}

// Valida tudo antes de mexer na partida
fn apply_scores(m: &mut Match, score1: Option<Option<i64>>, score2: Option<Option<i64>>) -> Result<(), AppError> {
    let score1 = score1.map(to_score).transpose()?;
    let score2 = score2.map(to_score).transpose()?;

    if let Some(s1) = score1 {
        m.score1 = s1;
    }
    if let Some(s2) = score2 {
        m.score2 = s2;
    }
    Ok(())
}

fn to_score(raw: Option<i64>) -> Result<Option<u32>, AppError> {
    raw.map(|v| u32::try_from(v).map_err(|_| AppError::InvalidInput(format!("Placar inválido: {}.", v))))
        .transpose()
}

// Ordem de chegada preservada, sem repetidos
fn unique_in_order(requested: &[Uuid]) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::with_capacity(requested.len());
    for id in requested {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

// O RETURNING não garante ordem; volta à ordem do pedido
fn newly_invited(requested: &[Uuid], created: &[TournamentInvitation]) -> Vec<Uuid> {
    requested
        .iter()
        .filter(|id| created.iter().any(|inv| inv.user_id == **id))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tournament::InvitationStatus;
    use chrono::Utc;
    use sqlx::types::Json;
    use std::collections::BTreeMap;

    fn tournament(kind: TournamentType, creator: Uuid, invited: Vec<Uuid>, matches: Rounds) -> Tournament {
        Tournament {
            id: Uuid::new_v4(),
            name: "Copa".to_string(),
            game: "ping-pong".to_string(),
            players: (invited.len() + 1) as i32,
            kind,
            invited: Json(invited),
            matches: Json(matches),
            standings: Json(BTreeMap::new()),
            created_by: creator,
            created_at: Utc::now(),
        }
    }

    fn invitation(tournament_id: Uuid, user_id: Uuid) -> TournamentInvitation {
        TournamentInvitation {
            id: Uuid::new_v4(),
            tournament_id,
            user_id,
            status: InvitationStatus::Pending,
            invited_at: Utc::now(),
            responded_at: None,
        }
    }

    fn scored(p1: Uuid, p2: Uuid, s1: u32, s2: u32) -> Match {
        Match { player1: Some(p1), player2: Some(p2), score1: Some(s1), score2: Some(s2) }
    }

    #[test]
    fn scores_must_fit_in_u32() {
        assert_eq!(to_score(None).unwrap(), None);
        assert_eq!(to_score(Some(0)).unwrap(), Some(0));
        assert_eq!(to_score(Some(21)).unwrap(), Some(21));
        assert!(matches!(to_score(Some(-1)), Err(AppError::InvalidInput(_))));
        assert!(matches!(to_score(Some(i64::MAX)), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn partial_score_report_keeps_the_other_side() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut m = Match::new(Some(a), Some(b));

        apply_scores(&mut m, Some(Some(3)), Some(Some(1))).unwrap();
        apply_scores(&mut m, Some(Some(4)), None).unwrap();
        assert_eq!((m.score1, m.score2), (Some(4), Some(1)));

        // null limpa só o campo enviado
        apply_scores(&mut m, None, Some(None)).unwrap();
        assert_eq!((m.score1, m.score2), (Some(4), None));

        // Erro em um lado não grava o outro
        assert!(apply_scores(&mut m, Some(Some(9)), Some(Some(-1))).is_err());
        assert_eq!((m.score1, m.score2), (Some(4), None));
    }

    #[test]
    fn invite_requests_drop_repeats_and_keep_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(unique_in_order(&[a, b, a, c, b]), vec![a, b, c]);

        let t = Uuid::new_v4();
        let created = vec![invitation(t, c), invitation(t, a)];
        assert_eq!(newly_invited(&[a, b, c], &created), vec![a, c]);
        assert!(newly_invited(&[b], &created).is_empty());
    }

    #[test]
    fn championship_detail_has_standings_and_no_winner() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let t = tournament(TournamentType::Championship, a, vec![b], vec![vec![scored(a, b, 2, 1)]]);

        let d = detail(t);
        assert_eq!(d.winner, None);
        assert_eq!(d.auto_standings.len(), 2);
        assert_eq!(d.auto_standings[0].user_id, a);
        assert_eq!(d.auto_standings[0].points, 3);
        assert_eq!(d.auto_standings[1].points, 0);
    }

    #[test]
    fn elimination_detail_reports_final_winner() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let t = tournament(TournamentType::Elimination, a, vec![b], vec![vec![scored(a, b, 0, 3)]]);

        let d = detail(t);
        assert!(d.auto_standings.is_empty());
        assert_eq!(d.winner, Some(b));
    }

    #[test]
    fn detail_serializes_flat_with_computed_fields() {
        let a = Uuid::new_v4();
        let t = tournament(TournamentType::Elimination, a, vec![], vec![vec![Match::new(Some(a), None)]]);

        let json = serde_json::to_value(detail(t)).unwrap();
        assert_eq!(json["type"], "Elimination");
        assert_eq!(json["players"], 1);
        assert_eq!(json["createdBy"], a.to_string());
        assert!(json["autoStandings"].as_array().unwrap().is_empty());
        assert!(json["winner"].is_null());
        assert!(json["matches"][0][0]["player2"].is_null());
    }

    mod with_database {
        use super::*;
        use crate::db::UserRepository;

        fn service(pool: &PgPool) -> TournamentService {
            TournamentService::new(
                TournamentRepository::new(pool.clone()),
                InvitationRepository::new(pool.clone()),
                pool.clone(),
            )
        }

        async fn users(pool: &PgPool, names: &[&str]) -> Vec<Uuid> {
            let repo = UserRepository::new(pool.clone());
            let mut ids = Vec::with_capacity(names.len());
            for name in names {
                let user = repo
                    .create_user(pool, &format!("{}@empresa.com", name), "hash", Some(name))
                    .await
                    .unwrap();
                ids.push(user.id);
            }
            ids
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn creation_invites_everyone_but_the_creator(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia", "caio"]).await;
            let (a, b, c) = (ids[0], ids[1], ids[2]);

            let created = service
                .create_tournament("Copa", "FIFA 25", TournamentType::Championship, &[b, a, c, b], a)
                .await
                .unwrap();
            assert_eq!(created.tournament.players, 3);
            assert_eq!(created.tournament.invited.0, vec![b, c]);

            assert!(service.list_my_invitations(a).await.unwrap().is_empty());
            for user in [b, c] {
                let pending = service.list_my_invitations(user).await.unwrap();
                assert_eq!(pending.len(), 1);
                assert_eq!(pending[0].tournament_id, created.tournament.id);
                assert_eq!(pending[0].tournament_name, "Copa");
                assert_eq!(pending[0].status, InvitationStatus::Pending);
            }
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn unknown_invitee_aborts_creation(pool: PgPool) {
            let service = service(&pool);
            let a = users(&pool, &["ana"]).await[0];

            let result = service
                .create_tournament("Copa", "FIFA 25", TournamentType::Elimination, &[Uuid::new_v4()], a)
                .await;
            assert!(matches!(result, Err(AppError::InvalidInput(_))));

            // Nada do torneio sobra depois do rollback
            assert!(service.list_tournaments().await.unwrap().is_empty());
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn only_the_invitee_answers_an_invitation(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia"]).await;
            let (a, b) = (ids[0], ids[1]);

            let t = service
                .create_tournament("Copa", "Pebolim", TournamentType::Championship, &[b], a)
                .await
                .unwrap()
                .tournament;
            let invitation = service.list_my_invitations(b).await.unwrap().remove(0);

            let unknown = service.respond_invitation(t.id, Uuid::new_v4(), b, InvitationAnswer::Accept).await;
            assert!(matches!(unknown, Err(AppError::InvitationNotFound)));

            // Convite de outro torneio no caminho
            let other_path = service.respond_invitation(Uuid::new_v4(), invitation.id, b, InvitationAnswer::Accept).await;
            assert!(matches!(other_path, Err(AppError::InvitationNotFound)));

            let stranger = service.respond_invitation(t.id, invitation.id, a, InvitationAnswer::Accept).await;
            assert!(matches!(stranger, Err(AppError::NotYourInvitation)));

            let message = service
                .respond_invitation(t.id, invitation.id, b, InvitationAnswer::Accept)
                .await
                .unwrap();
            assert_eq!(message, InvitationAnswer::Accept.message());

            let stored = service.invitation_repo.find_by_id(invitation.id).await.unwrap().unwrap();
            assert_eq!(stored.status, InvitationStatus::Accepted);
            assert!(stored.responded_at.is_some());
            assert!(service.list_my_invitations(b).await.unwrap().is_empty());

            // A tabela de jogos não muda com a resposta
            let after = service.get_tournament(t.id).await.unwrap().tournament;
            assert_eq!(after.matches.0, t.matches.0);
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn only_the_creator_deletes(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia"]).await;
            let (a, b) = (ids[0], ids[1]);

            let id = service
                .create_tournament("Copa", "FIFA 25", TournamentType::Elimination, &[b], a)
                .await
                .unwrap()
                .tournament
                .id;

            assert!(matches!(service.delete_tournament(id, b).await, Err(AppError::NotTournamentCreator)));
            assert!(service.get_tournament(id).await.is_ok());

            service.delete_tournament(id, a).await.unwrap();
            assert!(matches!(service.get_tournament(id).await, Err(AppError::TournamentNotFound)));
            assert!(service.list_my_invitations(b).await.unwrap().is_empty());
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn manual_invites_report_only_new_invitees(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia", "caio", "duda"]).await;
            let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

            let id = service
                .create_tournament("Copa", "FIFA 25", TournamentType::Championship, &[b], a)
                .await
                .unwrap()
                .tournament
                .id;

            assert_eq!(service.invite_users(id, &[b, c, c, d]).await.unwrap(), vec![c, d]);
            assert!(matches!(service.invite_users(id, &[b, c]).await, Err(AppError::AllAlreadyInvited)));
            assert!(matches!(service.invite_user(id, d).await, Err(AppError::AlreadyInvited)));
            assert!(matches!(service.invite_users(Uuid::new_v4(), &[b]).await, Err(AppError::TournamentNotFound)));
            assert!(matches!(service.invite_users(id, &[Uuid::new_v4()]).await, Err(AppError::UserNotFound)));

            // Convite avulso não mexe em participantes nem na tabela
            let t = service.get_tournament(id).await.unwrap().tournament;
            assert_eq!(t.players, 2);
            assert_eq!(t.invited.0, vec![b]);
            assert_eq!(service.list_my_invitations(d).await.unwrap().len(), 1);
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn concurrent_invites_create_a_single_invitation(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia"]).await;
            let (a, b) = (ids[0], ids[1]);

            let id = service
                .create_tournament("Copa", "FIFA 25", TournamentType::Championship, &[], a)
                .await
                .unwrap()
                .tournament
                .id;

            let attempts: Vec<_> = (0..8)
                .map(|_| {
                    let service = service.clone();
                    tokio::spawn(async move { service.invite_users(id, &[b]).await })
                })
                .collect();

            let mut invited = 0;
            for handle in attempts {
                match handle.await.unwrap() {
                    Ok(invitees) => {
                        assert_eq!(invitees, vec![b]);
                        invited += 1;
                    }
                    Err(AppError::AllAlreadyInvited) => {}
                    Err(other) => panic!("erro inesperado: {:?}", other),
                }
            }
            assert_eq!(invited, 1);
            assert_eq!(service.list_my_invitations(b).await.unwrap().len(), 1);
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn scores_are_persisted_per_match(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia"]).await;
            let (a, b) = (ids[0], ids[1]);

            let id = service
                .create_tournament("Copa", "Ping-pong", TournamentType::Championship, &[b], a)
                .await
                .unwrap()
                .tournament
                .id;

            service.report_score(id, 0, 0, Some(Some(3)), Some(Some(1))).await.unwrap();
            let m = service.get_tournament(id).await.unwrap().tournament.matches.0[0][0].clone();
            assert_eq!((m.score1, m.score2), (Some(3), Some(1)));

            // Campo ausente mantém, null limpa
            service.report_score(id, 0, 0, None, Some(None)).await.unwrap();
            let m = service.get_tournament(id).await.unwrap().tournament.matches.0[0][0].clone();
            assert_eq!((m.score1, m.score2), (Some(3), None));

            let negative = service.report_score(id, 0, 0, Some(Some(-1)), None).await;
            assert!(matches!(negative, Err(AppError::InvalidInput(_))));

            let missing = service.report_score(id, 5, 0, Some(Some(1)), None).await;
            assert!(matches!(missing, Err(AppError::MatchNotFound { round: 5, index: 0 })));

            let unknown = service.report_score(Uuid::new_v4(), 0, 0, Some(Some(1)), None).await;
            assert!(matches!(unknown, Err(AppError::TournamentNotFound)));
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn elimination_winners_advance_and_persist(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia", "caio", "duda"]).await;

            let created = service
                .create_tournament("Copa", "FIFA 25", TournamentType::Elimination, &ids[1..], ids[0])
                .await
                .unwrap()
                .tournament;
            let first_round = created.matches.0[0].clone();
            assert_eq!(first_round.len(), 2);

            for index in 0..2 {
                service.report_score(created.id, 0, index, Some(Some(2)), Some(Some(0))).await.unwrap();
            }
            let advanced = service.advance_round(created.id, 0).await.unwrap();
            let final_match = &advanced.tournament.matches.0[1][0];
            assert_eq!(final_match.player1, first_round[0].player1);
            assert_eq!(final_match.player2, first_round[1].player1);

            // Gravado, não só devolvido
            let stored = service.get_tournament(created.id).await.unwrap();
            assert_eq!(stored.tournament.matches.0[1][0].player1, first_round[0].player1);
            assert_eq!(stored.winner, None);

            service.report_score(created.id, 1, 0, Some(Some(1)), Some(Some(4))).await.unwrap();
            let done = service.get_tournament(created.id).await.unwrap();
            assert_eq!(done.winner, first_round[1].player1);

            // A final não tem rodada seguinte
            assert!(matches!(service.advance_round(created.id, 1).await, Err(AppError::InvalidInput(_))));
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn championship_does_not_advance(pool: PgPool) {
            let service = service(&pool);
            let ids = users(&pool, &["ana", "bia", "caio"]).await;

            let id = service
                .create_tournament("Copa", "Pebolim", TournamentType::Championship, &ids[1..], ids[0])
                .await
                .unwrap()
                .tournament
                .id;

            let result = service.advance_round(id, 0).await;
            assert!(matches!(result, Err(AppError::InvalidInput(_))));
        }
    }
}
