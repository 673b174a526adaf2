//! Auth service.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::auth::{
    AuthServiceError, CredentialVerifier, Credentials, IssuedSession, OperatorClaims, SessionId,
    SessionStore, parse_session_token,
};

/// Pause applied before every credential check when none is configured.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

pub struct SessionAuthService {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: SessionStore,
    login_delay: Duration,
}

impl std::fmt::Debug for SessionAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthService")
            .field("sessions", &self.sessions)
            .field("login_delay", &self.login_delay)
            .finish_non_exhaustive()
    }
}

impl SessionAuthService {
    #[must_use]
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        sessions: SessionStore,
        login_delay: Duration,
    ) -> Self {
        Self {
            verifier,
            sessions,
            login_delay,
        }
    }
}

#[async_trait]
impl AuthService for SessionAuthService {
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        tokio::time::sleep(self.login_delay).await;

        if !self.verifier.verify(&credentials).await? {
            warn!("rejected operator login");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let issued = self
            .sessions
            .issue(&credentials.email, Timestamp::now())
            .await?;

        info!(
            session = %issued.claims.session,
            evicted = issued.evicted.len(),
            "operator logged in"
        );

        Ok(issued)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<OperatorClaims, AuthServiceError> {
        let parsed =
            parse_session_token(bearer_token).map_err(|_err| AuthServiceError::NotFound)?;

        self.sessions.resolve(&parsed, Timestamp::now()).await
    }

    async fn logout(&self, session: SessionId) -> Result<(), AuthServiceError> {
        if !self.sessions.revoke(session).await {
            return Err(AuthServiceError::NotFound);
        }

        info!(%session, "operator logged out");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and start a session.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the claims of a live session.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<OperatorClaims, AuthServiceError>;

    /// End a session.
    async fn logout(&self, session: SessionId) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::{MockCredentialVerifier, Password, StaticCredentials};

    use super::*;

    fn service(verifier: impl CredentialVerifier + 'static) -> SessionAuthService {
        SessionAuthService::new(Arc::new(verifier), SessionStore::default(), Duration::ZERO)
    }

    #[tokio::test]
    async fn login_issues_a_usable_token() -> TestResult {
        let service = service(StaticCredentials::new(
            "admin@example.com",
            Password::new("secret"),
        ));

        let issued = service
            .login(Credentials::new("admin@example.com", "secret"))
            .await?;

        let claims = service.authenticate_bearer(&issued.token).await?;

        assert_eq!(claims.operator, "admin@example.com");
        assert_eq!(service.sessions.len().await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_creates_no_session() {
        let mut verifier = MockCredentialVerifier::new();

        verifier.expect_verify().times(1).returning(|_| Ok(false));

        let service = service(verifier);

        let result = service
            .login(Credentials::new("admin@example.com", "nope"))
            .await;

        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
        assert!(service.sessions.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn login_waits_for_the_configured_delay() -> TestResult {
        let mut verifier = MockCredentialVerifier::new();

        verifier.expect_verify().returning(|_| Ok(true));

        let service = SessionAuthService::new(
            Arc::new(verifier),
            SessionStore::default(),
            DEFAULT_LOGIN_DELAY,
        );

        let started = tokio::time::Instant::now();

        service
            .login(Credentials::new("admin@example.com", "secret"))
            .await?;

        assert!(started.elapsed() >= DEFAULT_LOGIN_DELAY);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_bearer_is_not_found() {
        let service = service(MockCredentialVerifier::new());

        assert!(matches!(
            service.authenticate_bearer("not-a-token").await,
            Err(AuthServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn logout_revokes_the_session() -> TestResult {
        let service = service(StaticCredentials::new("a@b.c", Password::new("pw")));
        let issued = service.login(Credentials::new("a@b.c", "pw")).await?;

        service.logout(issued.claims.session).await?;

        assert!(matches!(
            service.authenticate_bearer(&issued.token).await,
            Err(AuthServiceError::NotFound)
        ));
        assert!(matches!(
            service.logout(issued.claims.session).await,
            Err(AuthServiceError::NotFound)
        ));

        Ok(())
    }
}
