// src/db/invitation_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::is_foreign_key_violation, error::AppError},
    models::tournament::{InvitationStatus, InvitationWithTournament, TournamentInvitation},
};

#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Um convite 'pending' por usuário. Inserção em massa com UNNEST.
    /// Quem já tem convite fica de fora; só as linhas novas voltam.
    pub async fn create_pending<'e, E>(
        &self,
        executor: E,
        tournament_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<Vec<TournamentInvitation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invitations = sqlx::query_as::<_, TournamentInvitation>(
            r#"
            INSERT INTO tournament_invitations (tournament_id, user_id, status, invited_at)
            SELECT $1, unnest($2::uuid[]), 'pending', NOW()
            ON CONFLICT (tournament_id, user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(tournament_id)
        .bind(user_ids)
        .fetch_all(executor)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::UserNotFound;
            }
            e.into()
        })?;

        Ok(invitations)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TournamentInvitation>, AppError> {
        let invitation = sqlx::query_as::<_, TournamentInvitation>(
            "SELECT * FROM tournament_invitations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invitation)
    }

    pub async fn respond(&self, id: Uuid, status: InvitationStatus) -> Result<TournamentInvitation, AppError> {
        let invitation = sqlx::query_as::<_, TournamentInvitation>(
            r#"
            UPDATE tournament_invitations
            SET status = $2, responded_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(invitation)
    }

    pub async fn list_pending_for_user(&self, user_id: Uuid) -> Result<Vec<InvitationWithTournament>, AppError> {
        let invitations = sqlx::query_as::<_, InvitationWithTournament>(
            r#"
            SELECT ti.id, ti.tournament_id, ti.user_id, ti.status, ti.invited_at, ti.responded_at,
                   t.name AS tournament_name
            FROM tournament_invitations ti
            JOIN tournaments t ON ti.tournament_id = t.id
            WHERE ti.user_id = $1
              AND ti.status = 'pending'
            ORDER BY ti.invited_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invitations)
    }
}
