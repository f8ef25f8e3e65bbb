use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comunidade {
    pub id: Uuid,
    pub nome: String,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComunidadeInput {
    #[serde(default)]
    pub nome: String,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
}
