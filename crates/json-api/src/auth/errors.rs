//! Auth Errors

use orderdesk_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

/// Shown whenever submitted credentials do not match.
pub(crate) const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please try again.";

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief(INVALID_CREDENTIALS_MESSAGE)
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        AuthServiceError::Expired => StatusError::unauthorized().brief("Session expired"),
        AuthServiceError::ExpiryOutOfRange(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Credentials(source) => {
            error!("failed to verify operator credentials: {source}");

            StatusError::bad_gateway()
        }
    }
}
