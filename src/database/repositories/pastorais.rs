use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::pastoral::{Pastoral, PastoralInput};
use crate::database::store::StoreError;

const COLUMNS: &str = "id, nome, descricao, comunidade_id, coordenador_id, created_at, updated_at";

#[derive(Clone)]
pub struct PastoraisRepository {
    pool: PgPool,
}

impl PastoraisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Pastoral>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM pastorais ORDER BY nome");
        let rows = sqlx::query_as::<_, Pastoral>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Pastoral>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM pastorais WHERE id = $1");
        let row = sqlx::query_as::<_, Pastoral>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &PastoralInput) -> Result<Pastoral, StoreError> {
        let sql = format!(
            "INSERT INTO pastorais (id, nome, descricao, comunidade_id, coordenador_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now(), now()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Pastoral>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.nome)
            .bind(&input.descricao)
            .bind(input.comunidade_id)
            .bind(input.coordenador_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &PastoralInput,
    ) -> Result<Option<Pastoral>, StoreError> {
        let sql = format!(
            "UPDATE pastorais SET nome = $2, descricao = $3, comunidade_id = $4, \
             coordenador_id = $5, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Pastoral>(&sql)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.descricao)
            .bind(input.comunidade_id)
            .bind(input.coordenador_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM pastorais WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
