//! Current Session Handler

use orderdesk_app::auth::OperatorClaims;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Session identifier
    pub session: String,

    /// Operator the session belongs to
    pub operator: String,

    /// When the session started (RFC 3339)
    pub issued_at: String,

    /// When the session stops being accepted (RFC 3339)
    pub expires_at: String,
}

impl From<&OperatorClaims> for SessionResponse {
    fn from(claims: &OperatorClaims) -> Self {
        Self {
            session: claims.session.to_string(),
            operator: claims.operator.clone(),
            issued_at: claims.issued_at.to_string(),
            expires_at: claims.expires_at.to_string(),
        }
    }
}

/// Current Session Handler
#[endpoint(tags("session"), summary = "Current Session", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SessionResponse>, StatusError> {
    Ok(Json(depot.claims_or_401()?.into()))
}

#[cfg(test)]
mod tests {
    use orderdesk_app::{auth::MockAuthService, orders::MockOrdersService};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_SESSION, session_service};

    use super::*;

    #[tokio::test]
    async fn test_session_echoes_claims() -> TestResult {
        let mut res = TestClient::get("http://example.com/session")
            .send(&session_service(
                MockAuthService::new(),
                MockOrdersService::new(),
                Router::with_path("session").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(body.session, TEST_SESSION.to_string());
        assert_eq!(body.operator, "admin@example.com");

        Ok(())
    }
}
