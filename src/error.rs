use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::password_policy::PasswordStrength;
use crate::database::store::StoreError;
use crate::services::auth_service::AuthError;

/// HTTP-facing error. Every response carries the uniform envelope
/// `{error, code}`; weak-password rejections additionally carry the rule
/// breakdown as guidance to the user.
#[derive(Debug)]
pub enum ApiError {
    // 400
    MissingCredentials,
    EmailRequired,
    InvalidEmail,
    MissingFields(String),
    InvalidTempPassword,
    WeakPassword(PasswordStrength),
    Validation(String),

    // 401
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    TokenExpired,

    // 403
    UserInactive,

    // 404
    UserNotFound,
    NotFound(String),

    // 428
    PasswordChangeRequired,

    // 500
    UpdateFailed,
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials
            | ApiError::EmailRequired
            | ApiError::InvalidEmail
            | ApiError::MissingFields(_)
            | ApiError::InvalidTempPassword
            | ApiError::WeakPassword(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials
            | ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::UserInactive => StatusCode::FORBIDDEN,
            ApiError::UserNotFound | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PasswordChangeRequired => StatusCode::PRECONDITION_REQUIRED,
            ApiError::UpdateFailed | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials => "MISSING_CREDENTIALS",
            ApiError::EmailRequired => "EMAIL_REQUIRED",
            ApiError::InvalidEmail => "INVALID_EMAIL",
            ApiError::MissingFields(_) => "MISSING_FIELDS",
            ApiError::InvalidTempPassword => "INVALID_TEMP_PASSWORD",
            ApiError::WeakPassword(_) => "WEAK_PASSWORD",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::MissingToken => "MISSING_TOKEN",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::UserInactive => "USER_INACTIVE",
            ApiError::UserNotFound => "USER_NOT_FOUND",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::PasswordChangeRequired => "PASSWORD_CHANGE_REQUIRED",
            ApiError::UpdateFailed => "UPDATE_FAILED",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message, in the language of the wire contract.
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingCredentials => "Email e senha são obrigatórios".into(),
            ApiError::EmailRequired => "Email é obrigatório".into(),
            ApiError::InvalidEmail => "Email inválido".into(),
            ApiError::MissingFields(fields) => {
                format!("Campos obrigatórios ausentes: {fields}")
            }
            ApiError::InvalidTempPassword => "Senha temporária inválida".into(),
            ApiError::WeakPassword(_) => "Senha não atende aos requisitos mínimos".into(),
            ApiError::Validation(message) => message.clone(),
            ApiError::InvalidCredentials => "Credenciais inválidas".into(),
            ApiError::MissingToken => "Token não informado".into(),
            ApiError::InvalidToken => "Token inválido".into(),
            ApiError::TokenExpired => "Token expirado".into(),
            ApiError::UserInactive => "Usuário inativo".into(),
            ApiError::UserNotFound => "Usuário não encontrado".into(),
            ApiError::NotFound(message) => message.clone(),
            ApiError::PasswordChangeRequired => "Troca de senha obrigatória".into(),
            ApiError::UpdateFailed => "Falha ao atualizar senha".into(),
            ApiError::Internal => "Erro interno do servidor".into(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ApiError::WeakPassword(strength) => json!({
                "error": self.message(),
                "code": self.error_code(),
                "requirements": strength.requirements,
                "score": strength.score,
            }),
            _ => json!({
                "error": self.message(),
                "code": self.error_code(),
            }),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::UserInactive => ApiError::UserInactive,
            AuthError::PasswordChangeRequired => ApiError::PasswordChangeRequired,
            AuthError::UserNotFound => ApiError::UserNotFound,
            AuthError::InvalidTempPassword => ApiError::InvalidTempPassword,
            AuthError::WeakPassword(strength) => ApiError::WeakPassword(strength),
            AuthError::TokenExpired => ApiError::TokenExpired,
            AuthError::TokenInvalid => ApiError::InvalidToken,
            AuthError::UpdateFailed => ApiError::UpdateFailed,
            // Full detail stays in the server log; the client gets a generic
            // message.
            AuthError::Store(e) => {
                tracing::error!(error = %e, "store failure in auth flow");
                ApiError::Internal
            }
            AuthError::Hash(e) => {
                tracing::error!(error = %e, "hashing failure in auth flow");
                ApiError::Internal
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "token issuance failure");
                ApiError::Internal
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "store failure");
        ApiError::Internal
    }
}
