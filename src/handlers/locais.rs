use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::database::models::local::LocalInput;
use crate::database::repositories::locais::LocaisRepository;
use crate::error::ApiError;
use crate::state::AppState;

fn validate(input: &LocalInput) -> Result<(), ApiError> {
    if input.nome.trim().is_empty() {
        return Err(ApiError::Validation("nome é obrigatório".into()));
    }
    if matches!(input.capacidade, Some(c) if c < 0) {
        return Err(ApiError::Validation("capacidade não pode ser negativa".into()));
    }
    Ok(())
}

/// GET /api/locais
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = LocaisRepository::new(state.pool.clone()).list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/locais/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = LocaisRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Local não encontrado".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/locais
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<LocalInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = LocaisRepository::new(state.pool.clone()).create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// PUT /api/locais/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<LocalInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = LocaisRepository::new(state.pool.clone())
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Local não encontrado".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// DELETE /api/locais/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = LocaisRepository::new(state.pool.clone()).delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound("Local não encontrado".into()));
    }
    Ok(Json(json!({ "success": true })))
}
