use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::pessoa::{Pessoa, PessoaInput};
use crate::database::store::StoreError;

const COLUMNS: &str = "id, nome, email, telefone, comunidade_id, created_at, updated_at";

#[derive(Clone)]
pub struct PessoasRepository {
    pool: PgPool,
}

impl PessoasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Pessoa>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM pessoas ORDER BY nome");
        let rows = sqlx::query_as::<_, Pessoa>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Pessoa>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM pessoas WHERE id = $1");
        let row = sqlx::query_as::<_, Pessoa>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &PessoaInput) -> Result<Pessoa, StoreError> {
        let sql = format!(
            "INSERT INTO pessoas (id, nome, email, telefone, comunidade_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now(), now()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Pessoa>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.nome)
            .bind(&input.email)
            .bind(&input.telefone)
            .bind(input.comunidade_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, input: &PessoaInput) -> Result<Option<Pessoa>, StoreError> {
        let sql = format!(
            "UPDATE pessoas SET nome = $2, email = $3, telefone = $4, comunidade_id = $5, \
             updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Pessoa>(&sql)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.email)
            .bind(&input.telefone)
            .bind(input.comunidade_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM pessoas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
