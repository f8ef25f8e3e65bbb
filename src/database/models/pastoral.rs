use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pastoral {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub comunidade_id: Option<Uuid>,
    /// Coordinator, references a Pessoa.
    pub coordenador_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PastoralInput {
    #[serde(default)]
    pub nome: String,
    pub descricao: Option<String>,
    pub comunidade_id: Option<Uuid>,
    pub coordenador_id: Option<Uuid>,
}
