use std::collections::HashMap;

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::store::StoreError;
use crate::error::ApiError;
use crate::state::AppState;

async fn count(pool: &PgPool, table: &str) -> Result<i64, StoreError> {
    // Table names come from the fixed list below, never from the request.
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let total = sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await?;
    Ok(total)
}

/// GET /api/dashboard/resumo — aggregate counts for the landing dashboard:
/// per-entity totals, events grouped by status and actions grouped by month.
pub async fn resumo(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let pool = &state.pool;

    let mut totais = HashMap::new();
    for table in [
        "comunidades",
        "pastorais",
        "pessoas",
        "locais",
        "eventos",
        "acoes",
    ] {
        totais.insert(table.to_string(), count(pool, table).await?);
    }

    let eventos_por_status: HashMap<String, i64> = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM eventos GROUP BY status",
    )
    .fetch_all(pool)
    .await
    .map_err(StoreError::from)?
    .into_iter()
    .collect();

    let acoes_por_mes: Vec<(String, i64)> = sqlx::query_as::<_, (String, i64)>(
        "SELECT to_char(date_trunc('month', data), 'YYYY-MM') AS mes, COUNT(*) \
         FROM acoes WHERE data IS NOT NULL GROUP BY 1 ORDER BY 1",
    )
    .fetch_all(pool)
    .await
    .map_err(StoreError::from)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "totais": totais,
            "eventos_por_status": eventos_por_status,
            "acoes_por_mes": acoes_por_mes
                .into_iter()
                .map(|(mes, total)| json!({ "mes": mes, "total": total }))
                .collect::<Vec<_>>(),
        },
    })))
}
