use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::token::TokenError;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub perfil_id: Option<Uuid>,
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get("authorization")
        .ok_or(ApiError::MissingToken)?
        .to_str()
        .map_err(|_| ApiError::InvalidToken)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::InvalidToken)?
        .trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }
    Ok(token)
}

/// Signature/expiry gate for protected routes. The deeper active-user
/// recheck belongs to the explicit `/auth/verify` flow.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)?;

    let claims = state.tokens.verify(token).map_err(|e| match e {
        TokenError::Expired => ApiError::TokenExpired,
        _ => ApiError::InvalidToken,
    })?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        perfil_id: claims.perfil_id,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_token() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer(&headers),
            Err(ApiError::MissingToken)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_invalid() {
        let headers = headers_with("Basic abc123");
        assert!(matches!(
            extract_bearer(&headers),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn empty_bearer_is_missing_token() {
        let headers = headers_with("Bearer   ");
        assert!(matches!(
            extract_bearer(&headers),
            Err(ApiError::MissingToken)
        ));
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }
}
