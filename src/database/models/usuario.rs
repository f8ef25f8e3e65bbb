use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Credential record. The hash and the temporary password never leave the
/// server, so both are skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub senha_hash: Option<String>,
    #[serde(skip_serializing)]
    pub senha_temporaria: Option<String>,
    pub ativo: bool,
    pub ultimo_login: Option<DateTime<Utc>>,
    pub perfil_id: Option<Uuid>,
    pub pessoa_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user summary exposed by login responses.
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResumo {
    pub id: Uuid,
    pub email: String,
    pub perfil_id: Option<Uuid>,
    pub pessoa_id: Option<Uuid>,
}

impl From<&Usuario> for UsuarioResumo {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id,
            email: usuario.email.clone(),
            perfil_id: usuario.perfil_id,
            pessoa_id: usuario.pessoa_id,
        }
    }
}
