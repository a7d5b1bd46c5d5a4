// src/models/tournament.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "tournament_type")]
pub enum TournamentType {
    Championship, // Todos contra todos (rodadas rotativas)
    Elimination,  // Mata-mata simples
}

// Partida embutida no torneio. `player2 = None` é um "bye".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Match {
    pub player1: Option<Uuid>,
    pub player2: Option<Uuid>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
}

impl Match {
    pub fn new(player1: Option<Uuid>, player2: Option<Uuid>) -> Self {
        Self { player1, player2, score1: None, score2: None }
    }
}

/// Rodadas ordenadas, cada uma com as suas partidas em ordem.
pub type Rounds = Vec<Vec<Match>>;

/// Pontuação manual (editável por qualquer participante), por usuário.
pub type ManualStandings = BTreeMap<Uuid, i64>;

// Linha da tabela 'tournaments'
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub game: String,
    pub players: i32,

    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: TournamentType,

    #[schema(value_type = Vec<Uuid>)]
    pub invited: Json<Vec<Uuid>>,

    #[schema(value_type = Vec<Vec<Match>>)]
    pub matches: Json<Rounds>,

    #[schema(value_type = Object)]
    pub standings: Json<ManualStandings>,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Criador seguido dos convidados, sem repetições.
    pub fn participants(&self) -> Vec<Uuid> {
        participant_list(self.created_by, &self.invited.0)
    }
}

/// Monta a lista de participantes: o criador sempre entra primeiro.
pub fn participant_list(creator: Uuid, invited: &[Uuid]) -> Vec<Uuid> {
    let mut participants = vec![creator];
    for id in invited {
        if !participants.contains(id) {
            participants.push(*id);
        }
    }
    participants
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub user_id: Uuid,
    pub points: i64,
}

// Torneio + dados calculados na leitura
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,

    // Calculada a partir dos placares (somente Championship)
    pub auto_standings: Vec<StandingEntry>,

    // Vencedor da final (somente Elimination)
    pub winner: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentResponse {
    pub tournament: TournamentDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentsResponse {
    pub tournaments: Vec<Tournament>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentPayload {
    #[validate(length(min = 1, message = "O nome do torneio é obrigatório."))]
    #[schema(example = "Copa do Escritório")]
    pub name: String,

    #[validate(length(min = 1, message = "O jogo é obrigatório."))]
    #[schema(example = "FIFA 25")]
    pub game: String,

    #[serde(rename = "type")]
    pub kind: TournamentType,

    #[serde(default)]
    pub invited: Vec<Uuid>,
}

// Atualização parcial. `matches` e `standings` são reescritos por inteiro.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentPayload {
    #[validate(length(min = 1, message = "O nome do torneio não pode ser vazio."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "O jogo não pode ser vazio."))]
    pub game: Option<String>,

    #[schema(value_type = Option<Vec<Vec<Match>>>)]
    pub matches: Option<Rounds>,

    #[schema(value_type = Option<Object>)]
    pub standings: Option<ManualStandings>,
}

// Placar de uma única partida: campo ausente mantém o valor gravado, null limpa
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportScorePayload {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, minimum = 0)]
    pub score1: Option<Option<i64>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, minimum = 0)]
    pub score2: Option<Option<i64>>,
}

// Só é chamado quando o campo veio no JSON (inclusive como null)
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// --- Convites ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInvitation {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

// Convite pendente com o nome do torneio (tela "Meus convites")
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationWithTournament {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub tournament_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationAnswer {
    Accept,
    Decline,
}

impl InvitationAnswer {
    pub fn status(self) -> InvitationStatus {
        match self {
            InvitationAnswer::Accept => InvitationStatus::Accepted,
            InvitationAnswer::Decline => InvitationStatus::Declined,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            InvitationAnswer::Accept => "Você entrou no torneio!",
            InvitationAnswer::Decline => "Você recusou o convite para o torneio.",
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvitationsResponse {
    pub invitations: Vec<InvitationWithTournament>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteUserPayload {
    pub tournament_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteUsersPayload {
    #[validate(length(min = 1, message = "Nenhum usuário para convidar."))]
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InviteUsersResponse {
    pub success: bool,
    pub invited: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_comes_first_and_duplicates_collapse() {
        let creator = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let participants = participant_list(creator, &[a, creator, b, a]);
        assert_eq!(participants, vec![creator, a, b]);
    }

    #[test]
    fn tournament_type_uses_pascal_case_on_the_wire() {
        let json = serde_json::to_string(&TournamentType::Championship).unwrap();
        assert_eq!(json, "\"Championship\"");

        let parsed: TournamentType = serde_json::from_str("\"Elimination\"").unwrap();
        assert_eq!(parsed, TournamentType::Elimination);
    }

    #[test]
    fn create_payload_reads_type_field() {
        let payload: CreateTournamentPayload = serde_json::from_value(serde_json::json!({
            "name": "Copa",
            "game": "FIFA",
            "type": "Elimination"
        }))
        .unwrap();

        assert_eq!(payload.kind, TournamentType::Elimination);
        assert!(payload.invited.is_empty());
    }

    #[test]
    fn score_payload_tells_absent_from_null() {
        let p: ReportScorePayload = serde_json::from_str(r#"{"score1":3}"#).unwrap();
        assert_eq!((p.score1, p.score2), (Some(Some(3)), None));

        let p: ReportScorePayload = serde_json::from_str(r#"{"score1":null,"score2":2}"#).unwrap();
        assert_eq!((p.score1, p.score2), (Some(None), Some(Some(2))));

        let p: ReportScorePayload = serde_json::from_str("{}").unwrap();
        assert_eq!((p.score1, p.score2), (None, None));
    }
}
