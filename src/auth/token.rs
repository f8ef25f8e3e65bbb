use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user id)
    pub sub: Uuid,
    pub email: String,
    pub perfil_id: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed or carries an invalid signature")]
    Malformed,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Stateless issuer/verifier for bearer tokens. The secret is injected at
/// construction; nothing here reads process globals.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            expiry_hours: security.jwt_expiry_hours,
        }
    }

    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        perfil_id: Option<Uuid>,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            perfil_id,
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security(expiry_hours: i64) -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "unit-test-secret".into(),
            jwt_expiry_hours: expiry_hours,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn issue_verify_round_trip() {
        let service = TokenService::new(&security(24));
        let user_id = Uuid::new_v4();
        let perfil_id = Some(Uuid::new_v4());

        let token = service.issue(user_id, "a@b.com", perfil_id).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.perfil_id, perfil_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new(&security(-1));
        let token = service.issue(Uuid::new_v4(), "a@b.com", None).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let service = TokenService::new(&security(24));
        assert_eq!(service.verify("not.a.token"), Err(TokenError::Malformed));
    }

    #[test]
    fn foreign_signature_is_malformed() {
        let issuer = TokenService::new(&SecurityConfig {
            jwt_secret: "other-secret".into(),
            jwt_expiry_hours: 24,
            bcrypt_cost: 4,
        });
        let verifier = TokenService::new(&security(24));

        let token = issuer.issue(Uuid::new_v4(), "a@b.com", None).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Malformed));
    }
}
