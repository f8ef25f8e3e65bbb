use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::database::models::evento::EventoInput;
use crate::database::repositories::eventos::EventosRepository;
use crate::error::ApiError;
use crate::state::AppState;

fn validate(input: &EventoInput) -> Result<DateTime<Utc>, ApiError> {
    if input.titulo.trim().is_empty() {
        return Err(ApiError::Validation("titulo é obrigatório".into()));
    }
    let data_inicio = input
        .data_inicio
        .ok_or_else(|| ApiError::Validation("data_inicio é obrigatória".into()))?;
    if matches!(input.data_fim, Some(fim) if fim < data_inicio) {
        return Err(ApiError::Validation(
            "data_fim não pode ser anterior a data_inicio".into(),
        ));
    }
    Ok(data_inicio)
}

/// GET /api/eventos
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = EventosRepository::new(state.pool.clone()).list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/eventos/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = EventosRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Evento não encontrado".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/eventos
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<EventoInput>,
) -> Result<impl IntoResponse, ApiError> {
    let data_inicio = validate(&input)?;
    let row = EventosRepository::new(state.pool.clone())
        .create(&input, data_inicio)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// PUT /api/eventos/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EventoInput>,
) -> Result<impl IntoResponse, ApiError> {
    let data_inicio = validate(&input)?;
    let row = EventosRepository::new(state.pool.clone())
        .update(id, &input, data_inicio)
        .await?
        .ok_or_else(|| ApiError::NotFound("Evento não encontrado".into()))?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// DELETE /api/eventos/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = EventosRepository::new(state.pool.clone()).delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound("Evento não encontrado".into()));
    }
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(titulo: &str, inicio: Option<&str>, fim: Option<&str>) -> EventoInput {
        let parse = |s: &str| s.parse::<DateTime<Utc>>().unwrap();
        EventoInput {
            titulo: titulo.into(),
            descricao: None,
            data_inicio: inicio.map(parse),
            data_fim: fim.map(parse),
            local_id: None,
            pastoral_id: None,
            status: "agendado".into(),
        }
    }

    #[test]
    fn data_inicio_is_required() {
        assert!(matches!(
            validate(&input("Festa junina", None, None)),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn data_fim_must_not_precede_inicio() {
        let bad = input(
            "Festa junina",
            Some("2026-06-20T18:00:00Z"),
            Some("2026-06-20T15:00:00Z"),
        );
        assert!(matches!(validate(&bad), Err(ApiError::Validation(_))));

        let ok = input(
            "Festa junina",
            Some("2026-06-20T18:00:00Z"),
            Some("2026-06-20T22:00:00Z"),
        );
        assert!(validate(&ok).is_ok());
    }
}
