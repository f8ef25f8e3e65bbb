use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::evento::{Evento, EventoInput};
use crate::database::store::StoreError;

const COLUMNS: &str = "id, titulo, descricao, data_inicio, data_fim, local_id, pastoral_id, \
     status, created_at, updated_at";

#[derive(Clone)]
pub struct EventosRepository {
    pool: PgPool,
}

impl EventosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Evento>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM eventos ORDER BY data_inicio DESC");
        let rows = sqlx::query_as::<_, Evento>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Evento>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM eventos WHERE id = $1");
        let row = sqlx::query_as::<_, Evento>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// `data_inicio` is validated as present by the handler before reaching
    /// this point.
    pub async fn create(
        &self,
        input: &EventoInput,
        data_inicio: DateTime<Utc>,
    ) -> Result<Evento, StoreError> {
        let sql = format!(
            "INSERT INTO eventos (id, titulo, descricao, data_inicio, data_fim, local_id, \
             pastoral_id, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now(), now()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Evento>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.titulo)
            .bind(&input.descricao)
            .bind(data_inicio)
            .bind(input.data_fim)
            .bind(input.local_id)
            .bind(input.pastoral_id)
            .bind(&input.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &EventoInput,
        data_inicio: DateTime<Utc>,
    ) -> Result<Option<Evento>, StoreError> {
        let sql = format!(
            "UPDATE eventos SET titulo = $2, descricao = $3, data_inicio = $4, data_fim = $5, \
             local_id = $6, pastoral_id = $7, status = $8, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Evento>(&sql)
            .bind(id)
            .bind(&input.titulo)
            .bind(&input.descricao)
            .bind(data_inicio)
            .bind(input.data_fim)
            .bind(input.local_id)
            .bind(input.pastoral_id)
            .bind(&input.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM eventos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
