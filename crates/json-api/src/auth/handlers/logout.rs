//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Logout Handler
///
/// Ends the session and discards its order list.
#[endpoint(
    tags("session"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session ended"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not logged in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;

    state
        .app
        .auth
        .logout(session)
        .await
        .map_err(into_status_error)?;

    state.app.orders.forget_session(session).await;

    info!(%session, "session ended");

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use orderdesk_app::{auth::MockAuthService, orders::MockOrdersService};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_SESSION, session_service};

    use super::*;

    #[tokio::test]
    async fn test_logout_revokes_session_and_drops_board() -> TestResult {
        let mut auth = MockAuthService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_logout()
            .once()
            .withf(|session| *session == TEST_SESSION)
            .return_once(|_| Ok(()));

        orders
            .expect_forget_session()
            .once()
            .withf(|session| *session == TEST_SESSION)
            .return_once(|_| ());

        let res = TestClient::post("http://example.com/logout")
            .send(&session_service(
                auth,
                orders,
                Router::with_path("logout").post(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
