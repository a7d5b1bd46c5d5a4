// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{BookingRepository, FacilityRepository, InvitationRepository, RbacRepository, TournamentRepository, UserRepository},
    services::{auth::AuthService, booking_service::BookingService, tournament_service::TournamentService},
};

const DEFAULT_TOKEN_TTL_HOURS: i64 = 168;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Configuração lida do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub company_domain: Option<String>,
    pub bind_addr: String,
    pub cors_origin: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let token_ttl_hours = parse_or("JWT_EXPIRES_IN_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        if token_ttl_hours <= 0 || chrono::Duration::try_hours(token_ttl_hours).is_none() {
            anyhow::bail!("JWT_EXPIRES_IN_HOURS fora do intervalo: {}", token_ttl_hours);
        }

        // Vazio equivale a "sem restrição de domínio"
        let company_domain = env::var("COMPANY_DOMAIN")
            .ok()
            .map(|d| d.trim().trim_start_matches('@').to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_hours,
            company_domain,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            max_connections,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().with_context(|| format!("{} inválida: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,

    // Serviços
    pub auth_service: AuthService,
    pub booking_service: BookingService,
    pub tournament_service: TournamentService,

    // Repositórios usados direto pelos handlers
    pub user_repo: UserRepository,
    pub facility_repo: FacilityRepository,
    pub rbac_repo: RbacRepository,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let facility_repo = FacilityRepository::new(db_pool.clone());
        let booking_repo = BookingRepository::new(db_pool.clone());
        let tournament_repo = TournamentRepository::new(db_pool.clone());
        let invitation_repo = InvitationRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
            config.company_domain.clone(),
            db_pool.clone(),
        );
        let booking_service = BookingService::new(booking_repo, facility_repo.clone(), db_pool.clone());
        let tournament_service = TournamentService::new(tournament_repo, invitation_repo, db_pool.clone());

        Self {
            db_pool,
            config,
            auth_service,
            booking_service,
            tournament_service,
            user_repo,
            facility_repo,
            rbac_repo,
        }
    }
}
