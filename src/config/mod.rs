use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Signing secret for bearer tokens. Startup fails when absent; there is
    /// deliberately no built-in default.
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            server: ServerConfig {
                port: parse_or("PORT", 3000)?,
            },
            database: DatabaseConfig {
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
                acquire_timeout_secs: parse_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: parse_or("JWT_EXPIRY_HOURS", 24)?,
                bcrypt_cost: parse_or("BCRYPT_COST", 12)?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so the scenarios share one
    // test function instead of racing each other.
    #[test]
    fn from_env_requires_jwt_secret() {
        env::remove_var("JWT_SECRET");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        env::set_var("JWT_SECRET", "   ");
        assert!(AppConfig::from_env().is_err());

        env::set_var("JWT_SECRET", "unit-test-secret");
        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.security.jwt_expiry_hours, 24);
        assert_eq!(config.security.bcrypt_cost, 12);
        assert_eq!(config.database.max_connections, 10);
        env::remove_var("JWT_SECRET");
    }

    #[test]
    fn parse_or_rejects_garbage() {
        env::set_var("PAROQUIA_TEST_PORT", "not-a-number");
        let result: Result<u16, _> = parse_or("PAROQUIA_TEST_PORT", 3000);
        assert!(matches!(result, Err(ConfigError::Invalid(_, _))));
        env::remove_var("PAROQUIA_TEST_PORT");
    }
}
