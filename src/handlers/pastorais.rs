use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::database::models::pastoral::PastoralInput;
use crate::database::repositories::pastorais::PastoraisRepository;
use crate::error::ApiError;
use crate::state::AppState;

fn validate(input: &PastoralInput) -> Result<(), ApiError> {
    if input.nome.trim().is_empty() {
        return Err(ApiError::Validation("nome é obrigatório".into()));
    }
    Ok(())
}

/// GET /api/pastorais
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = PastoraisRepository::new(state.pool.clone()).list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/pastorais/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = PastoraisRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pastoral não encontrada".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/pastorais
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<PastoralInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = PastoraisRepository::new(state.pool.clone())
        .create(&input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// PUT /api/pastorais/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<PastoralInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = PastoraisRepository::new(state.pool.clone())
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pastoral não encontrada".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// DELETE /api/pastorais/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = PastoraisRepository::new(state.pool.clone()).delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound("Pastoral não encontrada".into()));
    }
    Ok(Json(json!({ "success": true })))
}
