use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::database::models::pessoa::PessoaInput;
use crate::database::repositories::pessoas::PessoasRepository;
use crate::error::ApiError;
use crate::state::AppState;

fn validate(input: &PessoaInput) -> Result<(), ApiError> {
    if input.nome.trim().is_empty() {
        return Err(ApiError::Validation("nome é obrigatório".into()));
    }
    if let Some(email) = input.email.as_deref() {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(ApiError::InvalidEmail);
        }
    }
    Ok(())
}

/// GET /api/pessoas
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = PessoasRepository::new(state.pool.clone()).list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/pessoas/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = PessoasRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pessoa não encontrada".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/pessoas
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<PessoaInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = PessoasRepository::new(state.pool.clone())
        .create(&input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// PUT /api/pessoas/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<PessoaInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&input)?;
    let row = PessoasRepository::new(state.pool.clone())
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pessoa não encontrada".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// DELETE /api/pessoas/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = PessoasRepository::new(state.pool.clone()).delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound("Pessoa não encontrada".into()));
    }
    Ok(Json(json!({ "success": true })))
}
