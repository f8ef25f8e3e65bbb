pub mod auth_service;

pub use auth_service::{AuthError, AuthService, LoginResult, VerifiedSession};
