pub mod service_account;

use crate::error::AppError;

pub use service_account::{ServiceAccountAuth, ServiceAccountKey};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("credentials error: {0}")]
    Credentials(String),
    #[error("token exchange error: {0}")]
    TokenExchange(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Config(err.to_string())
    }
}
