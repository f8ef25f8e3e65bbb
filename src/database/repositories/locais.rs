use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::local::{Local, LocalInput};
use crate::database::store::StoreError;

const COLUMNS: &str = "id, nome, endereco, capacidade, created_at, updated_at";

#[derive(Clone)]
pub struct LocaisRepository {
    pool: PgPool,
}

impl LocaisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Local>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM locais ORDER BY nome");
        let rows = sqlx::query_as::<_, Local>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Local>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM locais WHERE id = $1");
        let row = sqlx::query_as::<_, Local>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &LocalInput) -> Result<Local, StoreError> {
        let sql = format!(
            "INSERT INTO locais (id, nome, endereco, capacidade, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Local>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.nome)
            .bind(&input.endereco)
            .bind(input.capacidade)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, input: &LocalInput) -> Result<Option<Local>, StoreError> {
        let sql = format!(
            "UPDATE locais SET nome = $2, endereco = $3, capacidade = $4, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Local>(&sql)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.endereco)
            .bind(input.capacidade)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM locais WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
