use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pessoa {
    pub id: Uuid,
    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub comunidade_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PessoaInput {
    #[serde(default)]
    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub comunidade_id: Option<Uuid>,
}
