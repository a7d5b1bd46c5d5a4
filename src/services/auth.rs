// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User, UserSummary},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    company_domain: Option<String>,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        jwt_secret: String,
        token_ttl: chrono::Duration,
        company_domain: Option<String>,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, jwt_secret, token_ttl, company_domain, pool }
    }

    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<(String, UserSummary), AppError> {
        let email = normalize_email(email);

        // 1. Somente e-mails corporativos (quando o domínio está configurado)
        if !email_matches_domain(&email, self.company_domain.as_deref()) {
            return Err(AppError::EmailDomainNotAllowed);
        }

        // 2. Checagem amigável antes do hash; a UNIQUE do banco cobre a corrida
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // 3. Hashing fora do runtime assíncrono
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
            ?;

        // 4. Cria Usuário
        let display_name = display_name.map(str::trim).filter(|name| !name.is_empty());
        let new_user = self.user_repo
            .create_user(&self.pool, &email, &hashed_password, display_name)
            .await?;

        tracing::info!("👤 Novo usuário registrado: {}", new_user.email);

        let token = self.create_token(&new_user)?;
        Ok((token, UserSummary::from(&new_user)))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, UserSummary), AppError> {
        let user = self.user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok((token, UserSummary::from(&user)))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decode_token(token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// E-mails são gravados e buscados sempre em minúsculas
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sem domínio configurado, qualquer e-mail é aceito.
fn email_matches_domain(email: &str, company_domain: Option<&str>) -> bool {
    match company_domain {
        None => true,
        Some(domain) => email
            .rsplit_once('@')
            .is_some_and(|(_, email_domain)| email_domain.eq_ignore_ascii_case(domain)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service() -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AuthService::new(
            UserRepository::new(pool.clone()),
            "segredo-de-teste".to_string(),
            chrono::Duration::hours(1),
            None,
            pool,
        )
    }

    fn user() -> User {
        User {
            id: uuid::Uuid::new_v4(),
            email: "ana@empresa.com".to_string(),
            password_hash: String::new(),
            display_name: Some("Ana".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn company_domain_is_enforced_case_insensitively() {
        assert!(email_matches_domain("ana@empresa.com", Some("empresa.com")));
        assert!(email_matches_domain("ana@EMPRESA.com", Some("empresa.com")));
        assert!(!email_matches_domain("ana@gmail.com", Some("empresa.com")));
        assert!(!email_matches_domain("sem-arroba", Some("empresa.com")));
        assert!(email_matches_domain("ana@gmail.com", None));
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("Ana@Empresa.COM"), "ana@empresa.com");
        assert_eq!(normalize_email("  ana@empresa.com "), "ana@empresa.com");
    }

    #[tokio::test]
    async fn token_round_trips_claims() {
        let service = service();
        let user = user();

        let token = service.create_token(&user).unwrap();
        let claims = service.decode_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let service = service();
        let other = AuthService { jwt_secret: "outro".to_string(), ..service.clone() };

        let token = other.create_token(&user()).unwrap();
        assert!(matches!(service.decode_token(&token), Err(AppError::InvalidToken)));
        assert!(matches!(service.decode_token("lixo"), Err(AppError::InvalidToken)));
    }

    mod with_database {
        use super::*;

        fn service(pool: PgPool) -> AuthService {
            AuthService::new(
                UserRepository::new(pool.clone()),
                "segredo-de-teste".to_string(),
                chrono::Duration::hours(1),
                Some("empresa.com".to_string()),
                pool,
            )
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "requer Postgres (DATABASE_URL)"]
        async fn email_case_does_not_create_a_second_account(pool: PgPool) {
            let service = service(pool);

            let (_, ana) = service.register_user("Ana@Empresa.com", "123456", None).await.unwrap();
            assert_eq!(ana.email, "ana@empresa.com");

            let again = service.register_user("ana@empresa.com", "123456", None).await;
            assert!(matches!(again, Err(AppError::EmailAlreadyExists)));

            let (_, logged) = service.login_user("ANA@empresa.com", "123456").await.unwrap();
            assert_eq!(logged.id, ana.id);
        }
    }
}
