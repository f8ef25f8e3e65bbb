pub mod auth;

pub use auth::{extract_bearer, require_auth, AuthUser};
