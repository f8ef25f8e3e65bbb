use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use super::models::perfil::Perfil;
use super::models::usuario::Usuario;

/// Closed set of data-access failures. "Not found" is a normal negative
/// result (`Ok(None)`), never an error.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("data store unavailable: {0}")]
    Unavailable(String),

    #[error("data integrity violation: {0}")]
    Integrity(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Accessor boundary for the credential records. Injected into the
/// authentication flow so tests can substitute an in-memory store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch a user by email without filtering on `ativo`; the login path
    /// inspects the flag itself to distinguish "inactive" from "unknown".
    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, StoreError>;

    /// Fetch a user by id, active records only.
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Usuario>, StoreError>;

    /// Persist a new password hash. When `clear_temporaria` is set the
    /// temporary password is cleared in the same statement, so the two
    /// mutations are atomic. Returns whether a row was updated.
    async fn set_password_hash(
        &self,
        id: Uuid,
        hash: &str,
        clear_temporaria: bool,
    ) -> Result<bool, StoreError>;

    /// Record a successful login. Callers treat failures as non-fatal.
    async fn touch_ultimo_login(&self, id: Uuid) -> Result<(), StoreError>;

    /// Fetch the access profile referenced by a user, for session enrichment.
    async fn find_perfil(&self, id: Uuid) -> Result<Option<Perfil>, StoreError>;
}

/// Forwarding impl so a shared `Arc<T>` satisfies the same boundary as the
/// bare store it wraps. Lets callers hand the injected store to the service
/// while retaining a handle of their own.
#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, StoreError> {
        (**self).find_by_email(email).await
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Usuario>, StoreError> {
        (**self).find_active_by_id(id).await
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        hash: &str,
        clear_temporaria: bool,
    ) -> Result<bool, StoreError> {
        (**self).set_password_hash(id, hash, clear_temporaria).await
    }

    async fn touch_ultimo_login(&self, id: Uuid) -> Result<(), StoreError> {
        (**self).touch_ultimo_login(id).await
    }

    async fn find_perfil(&self, id: Uuid) -> Result<Option<Perfil>, StoreError> {
        (**self).find_perfil(id).await
    }
}

const USUARIO_COLUMNS: &str = "id, email, senha_hash, senha_temporaria, ativo, ultimo_login, \
     perfil_id, pessoa_id, created_at, updated_at";

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, StoreError> {
        let sql = format!("SELECT {USUARIO_COLUMNS} FROM usuarios WHERE email = $1");
        let rows = sqlx::query_as::<_, Usuario>(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        // `email` is unique; a second row means the store is corrupt and no
        // amount of re-querying will fix it.
        if rows.len() > 1 {
            return Err(StoreError::Integrity(format!(
                "{} rows for unique email {email}",
                rows.len()
            )));
        }
        Ok(rows.into_iter().next())
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Usuario>, StoreError> {
        let sql = format!("SELECT {USUARIO_COLUMNS} FROM usuarios WHERE id = $1 AND ativo = true");
        let row = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        hash: &str,
        clear_temporaria: bool,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET senha_hash = $2,
                senha_temporaria = CASE WHEN $3 THEN NULL ELSE senha_temporaria END,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(hash)
        .bind(clear_temporaria)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch_ultimo_login(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE usuarios SET ultimo_login = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_perfil(&self, id: Uuid) -> Result<Option<Perfil>, StoreError> {
        let row = sqlx::query_as::<_, Perfil>(
            "SELECT id, nome, permissoes, created_at, updated_at FROM perfis WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
