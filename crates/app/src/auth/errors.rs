//! Auth service errors.

use thiserror::Error;

use crate::auth::CredentialError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session not found")]
    NotFound,

    #[error("session expired")]
    Expired,

    #[error("session expiry out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),

    #[error("credential verification error")]
    Credentials(#[from] CredentialError),
}
