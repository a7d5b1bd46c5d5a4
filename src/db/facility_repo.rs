// src/db/facility_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    models::facility::Facility,
};

#[derive(Clone)]
pub struct FacilityRepository {
    pool: PgPool,
}

impl FacilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Facility>, AppError> {
        let facilities = sqlx::query_as::<_, Facility>("SELECT * FROM facilities ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(facilities)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Facility>, AppError> {
        let facility = sqlx::query_as::<_, Facility>("SELECT * FROM facilities WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(facility)
    }

    /// Trava a linha da instalação até o fim da transação.
    /// Serializa reservas concorrentes do mesmo recurso.
    pub async fn lock_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM facilities WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(locked)
    }

    pub async fn create(&self, slug: &str, name: &str, icon: &str) -> Result<Facility, AppError> {
        sqlx::query_as::<_, Facility>(
            r#"
            INSERT INTO facilities (slug, name, icon)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(name)
        .bind(icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::FacilitySlugAlreadyExists(slug.to_string());
            }
            e.into()
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        slug: &str,
        name: &str,
        icon: &str,
    ) -> Result<Option<Facility>, AppError> {
        sqlx::query_as::<_, Facility>(
            r#"
            UPDATE facilities SET slug = $2, name = $3, icon = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(slug)
        .bind(name)
        .bind(icon)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::FacilitySlugAlreadyExists(slug.to_string());
            }
            e.into()
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
