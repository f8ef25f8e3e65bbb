pub mod manager;
pub mod models;
pub mod repositories;
pub mod store;

pub use manager::DatabaseError;
pub use store::{CredentialStore, PgCredentialStore, StoreError};
