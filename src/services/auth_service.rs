use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{self, HashError};
use crate::auth::password_policy::{self, PasswordStrength};
use crate::auth::token::{TokenError, TokenService};
use crate::database::models::usuario::{Usuario, UsuarioResumo};
use crate::database::store::{CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email and wrong password are indistinguishable on purpose.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user is inactive")]
    UserInactive,

    /// The account is valid but blocked pending its mandatory first rotation.
    #[error("password change required before login")]
    PasswordChangeRequired,

    #[error("user not found")]
    UserNotFound,

    #[error("temporary password does not match")]
    InvalidTempPassword,

    #[error("password does not meet the strength policy")]
    WeakPassword(PasswordStrength),

    #[error("token has expired")]
    TokenExpired,

    #[error("token is invalid")]
    TokenInvalid,

    #[error("password update touched no rows")]
    UpdateFailed,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("token issuance failed: {0}")]
    Token(TokenError),
}

#[derive(Debug)]
pub struct LoginResult {
    pub user: UsuarioResumo,
    /// Absent when the login was answered with a pending password change.
    pub token: Option<String>,
    pub requires_password_change: bool,
}

#[derive(Debug)]
pub struct VerifiedSession {
    pub user: Usuario,
    pub perfil_nome: Option<String>,
    pub permissoes: HashMap<String, bool>,
}

/// Orchestrates the credential lifecycle: login, first-access bootstrap,
/// password change/reset and bearer-token verification. The store and token
/// service are injected so the whole flow runs against fakes in tests.
pub struct AuthService<S> {
    store: S,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(store: S, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// One login attempt, driven by the stored user state.
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.ativo {
            return Err(AuthError::UserInactive);
        }

        // A pending temporary password takes precedence over the stored hash.
        if let Some(temporaria) = user.senha_temporaria.as_deref() {
            if senha == temporaria {
                info!(usuario = %user.id, "first access authenticated, password change pending");
                return Ok(LoginResult {
                    user: UsuarioResumo::from(&user),
                    token: None,
                    requires_password_change: true,
                });
            }
            return Err(AuthError::PasswordChangeRequired);
        }

        let hash = user.senha_hash.clone().ok_or(AuthError::InvalidCredentials)?;
        if !password::verify_password(senha.to_string(), hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id, &user.email, user.perfil_id)
            .map_err(AuthError::Token)?;

        // Best-effort: a failed timestamp update must not block the login.
        if let Err(e) = self.store.touch_ultimo_login(user.id).await {
            warn!(usuario = %user.id, error = %e, "failed to record last login");
        }

        info!(usuario = %user.id, "login succeeded");
        Ok(LoginResult {
            user: UsuarioResumo::from(&user),
            token: Some(token),
            requires_password_change: false,
        })
    }

    /// First-access flow: exchange the temporary password for a real one.
    pub async fn first_access_change(
        &self,
        email: &str,
        senha_temporaria: &str,
        nova_senha: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .filter(|u| u.ativo)
            .ok_or(AuthError::UserNotFound)?;

        match user.senha_temporaria.as_deref() {
            Some(stored) if stored == senha_temporaria => {}
            _ => return Err(AuthError::InvalidTempPassword),
        }

        self.rotate_password(user.id, nova_senha, true).await?;
        info!(usuario = %user.id, "first access completed, temporary password cleared");
        Ok(())
    }

    /// Authenticated flow: a logged-in user changing their own password.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        senha_atual: &str,
        nova_senha: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .store
            .find_active_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let hash = user.senha_hash.clone().ok_or(AuthError::InvalidCredentials)?;
        if !password::verify_password(senha_atual.to_string(), hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        self.rotate_password(user.id, nova_senha, false).await?;
        info!(usuario = %user.id, "password changed");
        Ok(())
    }

    /// Admin flow: rotate a user's password without the current one.
    /// Authorization is enforced upstream by the route middleware.
    pub async fn reset_password(
        &self,
        user_id: Uuid,
        nova_senha: &str,
    ) -> Result<UsuarioResumo, AuthError> {
        let user = self
            .store
            .find_active_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.rotate_password(user.id, nova_senha, true).await?;
        info!(usuario = %user.id, "password reset by administrator");
        Ok(UsuarioResumo::from(&user))
    }

    async fn rotate_password(
        &self,
        user_id: Uuid,
        nova_senha: &str,
        clear_temporaria: bool,
    ) -> Result<(), AuthError> {
        let strength = password_policy::evaluate(nova_senha);
        if !strength.is_acceptable() {
            return Err(AuthError::WeakPassword(strength));
        }

        let hash = password::hash_password(nova_senha.to_string(), self.bcrypt_cost).await?;
        if !self
            .store
            .set_password_hash(user_id, &hash, clear_temporaria)
            .await?
        {
            return Err(AuthError::UpdateFailed);
        }
        Ok(())
    }

    /// Validate a bearer token and re-check the user it names. Deactivation
    /// revokes outstanding tokens even though their signature stays valid.
    pub async fn verify(&self, token: &str) -> Result<VerifiedSession, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;

        let user = self
            .store
            .find_active_by_id(claims.sub)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        // Best-effort enrichment: a missing or unreadable profile degrades
        // to empty permissions, it never fails the verification.
        let (perfil_nome, permissoes) = match user.perfil_id {
            Some(perfil_id) => match self.store.find_perfil(perfil_id).await {
                Ok(Some(perfil)) => (Some(perfil.nome), perfil.permissoes.0),
                Ok(None) => (None, HashMap::new()),
                Err(e) => {
                    warn!(usuario = %user.id, error = %e, "profile lookup failed, permissions degraded");
                    (None, HashMap::new())
                }
            },
            None => (None, HashMap::new()),
        };

        Ok(VerifiedSession {
            user,
            perfil_nome,
            permissoes,
        })
    }
}
