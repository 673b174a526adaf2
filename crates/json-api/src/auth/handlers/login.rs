//! Login Handler

use std::sync::Arc;

use orderdesk_app::auth::{Credentials, IssuedSession};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Operator email address
    pub email: String,

    /// Operator password
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for later requests; shown only once
    pub token: String,

    /// Operator the session belongs to
    pub operator: String,

    /// When the session stops being accepted (RFC 3339)
    pub expires_at: String,
}

impl From<IssuedSession> for LoginResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            token: issued.token,
            operator: issued.claims.operator,
            expires_at: issued.claims.expires_at.to_string(),
        }
    }
}

/// Login Handler
///
/// Checks operator credentials and starts a session. Boards of sessions that expired in the
/// meantime are discarded.
#[endpoint(
    tags("session"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Session started"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Credential verifier unavailable"),
    ),
)]
#[tracing::instrument(name = "session.login", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = state
        .app
        .auth
        .login(Credentials::new(request.email, request.password))
        .await
        .map_err(into_status_error)?;

    for session in &issued.evicted {
        state.app.orders.forget_session(*session).await;
    }

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use orderdesk_app::{
        auth::{AuthServiceError, MockAuthService, SessionId},
        orders::MockOrdersService,
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        auth::INVALID_CREDENTIALS_MESSAGE,
        test_helpers::{make_claims, public_service, state_with},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(auth, Router::with_path("login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "admin@example.com"
                    && credentials.password.expose() == "secret"
            })
            .return_once(|_| {
                Ok(IssuedSession {
                    token: "od_v1_token".to_string(),
                    claims: make_claims(),
                    evicted: Vec::new(),
                })
            });

        let mut res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": "admin@example.com", "password": "secret" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(body.token, "od_v1_token");
        assert_eq!(body.operator, "admin@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_drops_boards_of_evicted_sessions() -> TestResult {
        let mut auth = MockAuthService::new();
        let mut orders = MockOrdersService::new();
        let stale = SessionId::new();

        auth.expect_login().once().return_once(move |_| {
            Ok(IssuedSession {
                token: "od_v1_token".to_string(),
                claims: make_claims(),
                evicted: vec![stale],
            })
        });

        orders
            .expect_forget_session()
            .once()
            .withf(move |session| *session == stale)
            .return_once(|_| ());

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with(auth, orders)))
                .push(Router::with_path("login").post(handler)),
        );

        let res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": "admin@example.com", "password": "secret" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_credentials_return_401_with_fixed_message() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": "admin@example.com", "password": "nope" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(res.take_string().await?.contains(INVALID_CREDENTIALS_MESSAGE));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": "admin@example.com" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
