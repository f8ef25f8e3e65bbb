pub mod password;
pub mod password_policy;
pub mod token;

pub use password_policy::{evaluate, PasswordRequirements, PasswordStrength};
pub use token::{Claims, TokenError, TokenService};
