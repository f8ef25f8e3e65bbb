use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::acao::{Acao, AcaoInput};
use crate::database::store::StoreError;

const COLUMNS: &str = "id, titulo, objetivo, pastoral_id, data, status, created_at, updated_at";

#[derive(Clone)]
pub struct AcoesRepository {
    pool: PgPool,
}

impl AcoesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Acao>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM acoes ORDER BY data DESC NULLS LAST");
        let rows = sqlx::query_as::<_, Acao>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Acao>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM acoes WHERE id = $1");
        let row = sqlx::query_as::<_, Acao>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &AcaoInput) -> Result<Acao, StoreError> {
        let sql = format!(
            "INSERT INTO acoes (id, titulo, objetivo, pastoral_id, data, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, now(), now()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Acao>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.titulo)
            .bind(&input.objetivo)
            .bind(input.pastoral_id)
            .bind(input.data)
            .bind(&input.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, input: &AcaoInput) -> Result<Option<Acao>, StoreError> {
        let sql = format!(
            "UPDATE acoes SET titulo = $2, objetivo = $3, pastoral_id = $4, data = $5, \
             status = $6, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Acao>(&sql)
            .bind(id)
            .bind(&input.titulo)
            .bind(&input.objetivo)
            .bind(input.pastoral_id)
            .bind(input.data)
            .bind(&input.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM acoes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
