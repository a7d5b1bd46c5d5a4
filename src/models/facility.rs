// src/models/facility.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Recurso compartilhado que pode ser reservado (console, mesa, cadeira...)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: Uuid,

    #[schema(example = "ps5")]
    pub slug: String,

    #[schema(example = "PlayStation 5")]
    pub name: String,

    #[schema(example = "gamepad")]
    pub icon: String,

    pub created_at: DateTime<Utc>,
}

// Slug: minúsculas, dígitos e hífens ("ping-pong")
fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid {
        let mut err = ValidationError::new("slug");
        err.message = Some("O slug deve conter apenas letras minúsculas, números e hífens.".into());
        return Err(err);
    }
    Ok(())
}

// Payload de criação/edição (administrador)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FacilityPayload {
    #[validate(custom(function = validate_slug))]
    #[schema(example = "foosball")]
    pub slug: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O ícone é obrigatório."))]
    pub icon: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacilitiesResponse {
    pub facilities: Vec<Facility>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityResponse {
    pub facility: Facility,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyResponse {
    pub facility_slug: String,
    pub occupied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_accepts_lowercase_hyphenated() {
        assert!(validate_slug("ps5").is_ok());
        assert!(validate_slug("ping-pong").is_ok());
    }

    #[test]
    fn slug_rejects_other_shapes() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Ping-Pong").is_err());
        assert!(validate_slug("ping pong").is_err());
        assert!(validate_slug("-ps5").is_err());
        assert!(validate_slug("ps5-").is_err());
    }
}
