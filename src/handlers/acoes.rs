use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::database::models::acao::AcaoInput;
use crate::database::repositories::acoes::AcoesRepository;
use crate::error::ApiError;
use crate::state::AppState;

fn validate(input: &AcaoInput) -> Result<(), ApiError> {
    if input.titulo.trim().is_empty() {
        return Err(ApiError::Validation("titulo é obrigatório".into()));
    }
    Ok(())
}

/// GET /api/acoes
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = AcoesRepository::new(state.pool.clone()).list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/acoes/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = AcoesRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ação não encontrada".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/acoes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AcaoInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = AcoesRepository::new(state.pool.clone()).create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// PUT /api/acoes/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AcaoInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = AcoesRepository::new(state.pool.clone())
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ação não encontrada".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// DELETE /api/acoes/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = AcoesRepository::new(state.pool.clone()).delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound("Ação não encontrada".into()));
    }
    Ok(Json(json!({ "success": true })))
}
