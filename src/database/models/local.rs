use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Local {
    pub id: Uuid,
    pub nome: String,
    pub endereco: Option<String>,
    pub capacidade: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalInput {
    #[serde(default)]
    pub nome: String,
    pub endereco: Option<String>,
    pub capacidade: Option<i32>,
}
