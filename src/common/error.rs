use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    // --- Identidade ---
    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Domínio de e-mail não permitido")]
    EmailDomainNotAllowed,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    // --- Instalações e reservas ---
    #[error("Instalação não encontrada")]
    FacilityNotFound,

    #[error("Já existe uma instalação com o slug '{0}'")]
    FacilitySlugAlreadyExists(String),

    #[error("Instalação ocupada no intervalo solicitado")]
    BookingConflict,

    // --- Torneios ---
    #[error("Torneio não encontrado")]
    TournamentNotFound,

    #[error("Partida não encontrada (rodada {round}, partida {index})")]
    MatchNotFound { round: usize, index: usize },

    #[error("Somente o criador pode excluir o torneio")]
    NotTournamentCreator,

    #[error("Convite não encontrado")]
    InvitationNotFound,

    #[error("O convite pertence a outro usuário")]
    NotYourInvitation,

    #[error("Usuário já convidado")]
    AlreadyInvited,

    #[error("Todos os usuários já foram convidados")]
    AllAlreadyInvited,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::EmailDomainNotAllowed
            | AppError::Forbidden(_)
            | AppError::NotTournamentCreator
            | AppError::NotYourInvitation => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::FacilityNotFound
            | AppError::TournamentNotFound
            | AppError::MatchNotFound { .. }
            | AppError::InvitationNotFound => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::FacilitySlugAlreadyExists(_)
            | AppError::BookingConflict
            | AppError::AlreadyInvited
            | AppError::AllAlreadyInvited => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Corpo ausente, malformado ou com campo faltando vira 400 no formato da API
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Corpo da requisição inválido: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidInput(msg) => msg,
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::EmailDomainNotAllowed => "Use o seu e-mail corporativo.".to_string(),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::UserNotFound => "Usuário não encontrado.".to_string(),
            AppError::Forbidden(msg) => msg,
            AppError::FacilityNotFound => "Instalação não encontrada.".to_string(),
            AppError::FacilitySlugAlreadyExists(slug) => {
                format!("Já existe uma instalação com o slug '{}'.", slug)
            }
            // Falha mais comum do fluxo de reserva: mensagem própria
            AppError::BookingConflict => {
                "A instalação está ocupada durante esse intervalo. Escolha outro horário.".to_string()
            }
            AppError::TournamentNotFound => "Torneio não encontrado.".to_string(),
            AppError::MatchNotFound { round, index } => {
                format!("Partida {} da rodada {} não existe.", index, round)
            }
            AppError::NotTournamentCreator => {
                "Somente o criador pode excluir este torneio.".to_string()
            }
            AppError::InvitationNotFound => "Convite não encontrado.".to_string(),
            AppError::NotYourInvitation => "Este convite não é seu.".to_string(),
            AppError::AlreadyInvited => "Usuário já convidado.".to_string(),
            AppError::AllAlreadyInvited => "Todos os usuários já foram convidados.".to_string(),

            // Todos os outros erros (banco, bcrypt, jwt, anyhow) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
