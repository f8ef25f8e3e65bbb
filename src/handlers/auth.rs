use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::{extract_bearer, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub senha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: Option<String>,
    #[serde(rename = "senhaTemporaria")]
    pub senha_temporaria: Option<String>,
    #[serde(rename = "novaSenha")]
    pub nova_senha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeOwnPasswordRequest {
    #[serde(rename = "senhaAtual")]
    pub senha_atual: Option<String>,
    #[serde(rename = "novaSenha")]
    pub nova_senha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(rename = "novaSenha")]
    pub nova_senha: Option<String>,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(&body.email).ok_or(ApiError::MissingCredentials)?;
    let senha = body
        .senha
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingCredentials)?;

    let result = state.auth.login(email, senha).await?;

    if result.requires_password_change {
        return Ok(Json(json!({
            "success": true,
            "requiresPasswordChange": true,
            "user": result.user,
        })));
    }

    Ok(Json(json!({
        "success": true,
        "token": result.token,
        "user": result.user,
    })))
}

/// POST /auth/change-password — first-access exchange of the temporary
/// password for a real one.
pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(&body.email).ok_or(ApiError::EmailRequired)?;
    if !email.contains('@') {
        return Err(ApiError::InvalidEmail);
    }
    let senha_temporaria = body
        .senha_temporaria
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::MissingFields("senhaTemporaria, novaSenha".into()))?;
    let nova_senha = body
        .nova_senha
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::MissingFields("senhaTemporaria, novaSenha".into()))?;

    state
        .auth
        .first_access_change(email, senha_temporaria, nova_senha)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Senha alterada com sucesso",
        "code": "PASSWORD_CHANGED",
    })))
}

/// PUT /auth/password — an authenticated user changing their own password.
pub async fn change_own_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthUser>,
    Json(body): Json<ChangeOwnPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let senha_atual = body
        .senha_atual
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::MissingFields("senhaAtual, novaSenha".into()))?;
    let nova_senha = body
        .nova_senha
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::MissingFields("senhaAtual, novaSenha".into()))?;

    state
        .auth
        .change_password(current.user_id, senha_atual, nova_senha)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Senha alterada com sucesso",
        "code": "PASSWORD_CHANGED",
    })))
}

/// POST /auth/reset-password/:usuario_id — administrative rotation.
pub async fn reset_password(
    State(state): State<AppState>,
    Path(usuario_id): Path<Uuid>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let nova_senha = body
        .nova_senha
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::MissingFields("novaSenha".into()))?;

    let user = state.auth.reset_password(usuario_id, nova_senha).await?;

    Ok(Json(json!({
        "message": "Senha redefinida com sucesso",
        "code": "PASSWORD_RESET",
        "user": { "id": user.id, "email": user.email },
    })))
}

/// POST /auth/verify — validate a bearer token and return the enriched
/// session. Deactivated users fail here even with a well-signed token.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = extract_bearer(&headers)?;
    let session = state.auth.verify(token).await?;

    Ok(Json(json!({
        "valid": true,
        "user": {
            "id": session.user.id,
            "email": session.user.email,
            "login": session.user.email,
            "perfil_id": session.user.perfil_id,
            "pessoa_id": session.user.pessoa_id,
            "perfil": session.perfil_nome,
            "permissoes": session.permissoes,
        },
    })))
}

/// POST /auth/logout — stateless tokens mean there is nothing to revoke
/// server-side; the client discards its copy.
pub async fn logout() -> Json<Value> {
    Json(json!({
        "message": "Logout efetuado com sucesso",
        "code": "LOGOUT_SUCCESS",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logout_is_idempotent() {
        for _ in 0..3 {
            let Json(body) = logout().await;
            assert_eq!(body["code"], "LOGOUT_SUCCESS");
        }
    }

    #[test]
    fn required_rejects_blank_strings() {
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some("   ".into())), None);
        assert_eq!(required(&Some(" a@b.com ".into())), Some("a@b.com"));
    }
}
