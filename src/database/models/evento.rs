use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Evento {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: Option<DateTime<Utc>>,
    pub local_id: Option<Uuid>,
    pub pastoral_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventoInput {
    #[serde(default)]
    pub titulo: String,
    pub descricao: Option<String>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub local_id: Option<Uuid>,
    pub pastoral_id: Option<Uuid>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "agendado".to_string()
}
