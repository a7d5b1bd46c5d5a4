// src/services/booking_service.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BookingRepository, FacilityRepository},
    models::{
        booking::{ActiveBooking, Booking, BookingOverview},
        facility::Facility,
    },
};

// Formatos sem fuso aceitos além de RFC 3339 (lidos como UTC)
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// `[s1, e1)` e `[s2, e2)` se sobrepõem, a menos que `e1 <= s2` ou `s1 >= e2`.
/// Intervalos que apenas se tocam não conflitam.
pub fn intervals_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    !(e1 <= s2 || s1 >= e2)
}

/// Interpreta o início pedido. Ausente = agora.
pub fn parse_start(raw: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(now);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidInput(format!("Horário de início inválido: '{}'.", raw)))
}

/// Calcula `[start, start + duração)`, validando a duração.
pub fn booking_window(
    start: DateTime<Utc>,
    duration_min: i64,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    if duration_min <= 0 {
        return Err(AppError::InvalidInput("A duração deve ser um número positivo de minutos.".into()));
    }

    let end = chrono::Duration::try_minutes(duration_min)
        .and_then(|duration| start.checked_add_signed(duration))
        .ok_or_else(|| AppError::InvalidInput("Duração fora do intervalo permitido.".into()))?;

    Ok((start, end))
}

#[derive(Clone)]
pub struct BookingService {
    booking_repo: BookingRepository,
    facility_repo: FacilityRepository,
    pool: PgPool,
}

impl BookingService {
    pub fn new(booking_repo: BookingRepository, facility_repo: FacilityRepository, pool: PgPool) -> Self {
        Self { booking_repo, facility_repo, pool }
    }

    /// Reserva `[start, start + duração)` se nada ocupado se sobrepõe.
    pub async fn create_booking(
        &self,
        facility_slug: &str,
        user_id: Uuid,
        start: Option<&str>,
        duration_min: i64,
    ) -> Result<Booking, AppError> {
        // 1. Validação da janela (antes de qualquer I/O)
        let start = parse_start(start, Utc::now())?;
        let (start, end) = booking_window(start, duration_min)?;

        // 2. Resolve o slug
        let facility = self.facility_repo
            .find_by_slug(facility_slug)
            .await?
            .ok_or(AppError::FacilityNotFound)?;

        // 3. Verificação + inserção atômicas
        let mut tx = self.pool.begin().await?;

        // Trava a instalação: o segundo pedido concorrente espera aqui
        self.facility_repo
            .lock_by_id(&mut *tx, facility.id)
            .await?
            .ok_or(AppError::FacilityNotFound)?;

        let candidates = self.booking_repo
            .occupied_after(&mut *tx, facility.id, start)
            .await?;

        if let Some(existing) = candidates
            .iter()
            .find(|b| intervals_overlap(b.start_time, b.end_time, start, end))
        {
            tracing::warn!(
                "⛔ Reserva recusada: '{}' ocupada em [{}, {}) (conflito com {})",
                facility.slug, start, end, existing.id
            );
            return Err(AppError::BookingConflict);
        }

        let booking = self.booking_repo
            .create(&mut *tx, facility.id, user_id, start, end)
            .await?;

        tx.commit().await?;

        tracing::info!("📅 Reserva {} criada para '{}' em [{}, {})", booking.id, facility.slug, start, end);
        Ok(booking)
    }

    /// Marca como 'completed' tudo que já terminou. Devolve os IDs afetados.
    pub async fn expire_past_bookings(&self) -> Result<Vec<Uuid>, AppError> {
        self.expire_past_bookings_at(Utc::now()).await
    }

    pub(crate) async fn expire_past_bookings_at(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, AppError> {
        let expired = self.booking_repo.expire_past(&self.pool, now).await?;
        if !expired.is_empty() {
            tracing::info!("⌛ {} reserva(s) expirada(s)", expired.len());
        }
        Ok(expired)
    }

    /// Reservas em curso ou futuras, com expiração preguiçosa antes da leitura.
    pub async fn list_active_bookings(&self) -> Result<Vec<ActiveBooking>, AppError> {
        self.list_active_bookings_at(Utc::now()).await
    }

    pub(crate) async fn list_active_bookings_at(&self, now: DateTime<Utc>) -> Result<Vec<ActiveBooking>, AppError> {
        self.expire_past_bookings_at(now).await?;
        self.booking_repo.list_active(&self.pool, now).await
    }

    /// Ocupação pontual (caso especial `start = agora` do formato por intervalo).
    pub async fn occupancy_now(&self, facility_slug: &str) -> Result<(Facility, bool), AppError> {
        let facility = self.facility_repo
            .find_by_slug(facility_slug)
            .await?
            .ok_or(AppError::FacilityNotFound)?;

        let occupied = self.booking_repo.is_occupied_at(facility.id, Utc::now()).await?;
        Ok((facility, occupied))
    }

    pub async fn list_all_bookings(&self) -> Result<Vec<BookingOverview>, AppError> {
        self.booking_repo.list_overview().await
    }
}
