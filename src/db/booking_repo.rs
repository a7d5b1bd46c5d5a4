// src/db/booking_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::is_exclusion_violation, error::AppError},
    models::booking::{ActiveBooking, Booking, BookingOverview},
};

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reservas ocupadas da instalação que ainda não terminaram em `start`.
    /// São as únicas candidatas a conflito com um pedido que começa em `start`.
    pub async fn occupied_after<'e, E>(
        &self,
        executor: E,
        facility_id: Uuid,
        start: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, facility_id, user_id, start_time, end_time, status
            FROM bookings
            WHERE facility_id = $1
              AND status = 'occupied'
              AND end_time > $2
            ORDER BY start_time
            "#,
        )
        .bind(facility_id)
        .bind(start)
        .fetch_all(executor)
        .await?;

        Ok(bookings)
    }

    /// Ocupação pontual: alguma reserva cobre `at`?
    pub async fn is_occupied_at(&self, facility_id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        let occupied: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM bookings
                WHERE facility_id = $1
                  AND status = 'occupied'
                  AND start_time <= $2
                  AND end_time > $2
            )
            "#,
        )
        .bind(facility_id)
        .bind(at)
        .fetch_one(&self.pool)
        .await?;

        Ok(occupied)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        facility_id: Uuid,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (facility_id, user_id, start_time, end_time, status)
            VALUES ($1, $2, $3, $4, 'occupied')
            RETURNING id, facility_id, user_id, start_time, end_time, status
            "#,
        )
        .bind(facility_id)
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // A constraint EXCLUDE barra o que escapar da verificação
            if is_exclusion_violation(&e) {
                return AppError::BookingConflict;
            }
            e.into()
        })
    }

    /// occupied -> completed para tudo com end_time <= now. Devolve os IDs afetados.
    pub async fn expire_past<'e, E>(&self, executor: E, now: DateTime<Utc>) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE bookings
            SET status = 'completed'
            WHERE status = 'occupied'
              AND end_time <= $1
            RETURNING id
            "#,
        )
        .bind(now)
        .fetch_all(executor)
        .await?;

        Ok(ids)
    }

    pub async fn list_active<'e, E>(&self, executor: E, now: DateTime<Utc>) -> Result<Vec<ActiveBooking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let active = sqlx::query_as::<_, ActiveBooking>(
            r#"
            SELECT b.id, b.facility_id, b.user_id, b.start_time, b.end_time, b.status,
                   u.email AS user_email,
                   f.slug  AS facility_slug
            FROM bookings   AS b
            JOIN users      AS u ON b.user_id     = u.id
            JOIN facilities AS f ON b.facility_id = f.id
            WHERE b.status = 'occupied'
              AND b.end_time > $1
            ORDER BY b.start_time ASC
            "#,
        )
        .bind(now)
        .fetch_all(executor)
        .await?;

        Ok(active)
    }

    pub async fn list_overview(&self) -> Result<Vec<BookingOverview>, AppError> {
        let bookings = sqlx::query_as::<_, BookingOverview>(
            r#"
            SELECT b.id, b.start_time, b.end_time, b.status,
                   u.email AS user_email,
                   f.name  AS facility_name
            FROM bookings   AS b
            JOIN users      AS u ON b.user_id     = u.id
            JOIN facilities AS f ON b.facility_id = f.id
            ORDER BY b.start_time DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }
}
