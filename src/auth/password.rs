use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("hashing task was cancelled")]
    Cancelled,
}

/// Hash a password with bcrypt at the configured cost factor.
///
/// bcrypt is CPU-bound, so the work runs on the blocking pool instead of
/// stalling the async workers.
pub async fn hash_password(password: String, cost: u32) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|_| HashError::Cancelled)?
        .map_err(|e| HashError::Hash(e.to_string()))
}

/// Verify a password against a stored bcrypt hash, off the event loop.
pub async fn verify_password(password: String, hash: String) -> Result<bool, HashError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| HashError::Cancelled)?
        .map_err(|e| HashError::Hash(e.to_string()))
}
