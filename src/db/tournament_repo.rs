// src/db/tournament_repo.rs

use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tournament::{ManualStandings, Rounds, Tournament, TournamentType},
};

#[derive(Clone)]
pub struct TournamentRepository {
    pool: PgPool,
}

impl TournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        game: &str,
        players: i32,
        kind: TournamentType,
        invited: &[Uuid],
        matches: &Rounds,
        created_by: Uuid,
    ) -> Result<Tournament, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments (name, game, players, type, invited, matches, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(game)
        .bind(players)
        .bind(kind)
        .bind(Json(invited))
        .bind(Json(matches))
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(tournament)
    }

    pub async fn list_all(&self) -> Result<Vec<Tournament>, AppError> {
        let tournaments = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tournaments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tournament>, AppError> {
        let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tournament)
    }

    /// Lê e trava o torneio até o fim da transação (edições de placar concorrentes).
    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Tournament>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(tournament)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tournaments WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    // Campos ausentes (NULL) mantêm o valor atual
    pub async fn update_fields<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        game: Option<&str>,
        matches: Option<&Rounds>,
        standings: Option<&ManualStandings>,
    ) -> Result<Option<Tournament>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments SET
                name      = COALESCE($2, name),
                game      = COALESCE($3, game),
                matches   = COALESCE($4, matches),
                standings = COALESCE($5, standings)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(game)
        .bind(matches.map(Json))
        .bind(standings.map(Json))
        .fetch_optional(executor)
        .await?;

        Ok(tournament)
    }

    pub async fn update_matches<'e, E>(&self, executor: E, id: Uuid, matches: &Rounds) -> Result<Tournament, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tournament = sqlx::query_as::<_, Tournament>(
            "UPDATE tournaments SET matches = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(matches))
        .fetch_one(executor)
        .await?;

        Ok(tournament)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
