use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::comunidade::{Comunidade, ComunidadeInput};
use crate::database::store::StoreError;

const COLUMNS: &str = "id, nome, endereco, telefone, created_at, updated_at";

#[derive(Clone)]
pub struct ComunidadesRepository {
    pool: PgPool,
}

impl ComunidadesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Comunidade>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM comunidades ORDER BY nome");
        let rows = sqlx::query_as::<_, Comunidade>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Comunidade>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM comunidades WHERE id = $1");
        let row = sqlx::query_as::<_, Comunidade>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &ComunidadeInput) -> Result<Comunidade, StoreError> {
        let sql = format!(
            "INSERT INTO comunidades (id, nome, endereco, telefone, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Comunidade>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.nome)
            .bind(&input.endereco)
            .bind(&input.telefone)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &ComunidadeInput,
    ) -> Result<Option<Comunidade>, StoreError> {
        let sql = format!(
            "UPDATE comunidades SET nome = $2, endereco = $3, telefone = $4, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Comunidade>(&sql)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.endereco)
            .bind(&input.telefone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM comunidades WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
