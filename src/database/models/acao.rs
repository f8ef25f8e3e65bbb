use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Acao {
    pub id: Uuid,
    pub titulo: String,
    pub objetivo: Option<String>,
    pub pastoral_id: Option<Uuid>,
    pub data: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcaoInput {
    #[serde(default)]
    pub titulo: String,
    pub objetivo: Option<String>,
    pub pastoral_id: Option<Uuid>,
    pub data: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pendente".to_string()
}
