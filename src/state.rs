use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::config::AppConfig;
use crate::database::store::PgCredentialStore;
use crate::services::auth_service::AuthService;

/// Shared application state. Everything here is explicitly constructed at
/// startup and handed to the router; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub auth: Arc<AuthService<PgCredentialStore>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let tokens = TokenService::new(&config.security);
        let auth = Arc::new(AuthService::new(
            PgCredentialStore::new(pool.clone()),
            tokens.clone(),
            config.security.bcrypt_cost,
        ));

        Self { pool, tokens, auth }
    }
}
