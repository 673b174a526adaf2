//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    catch_panic::CatchPanic,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth, healthcheck,
    observability::{metrics_handler, request_logging},
    orders,
    state::State,
};

/// Routes that require an operator session.
fn session_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("session").get(auth::handlers::session::handler))
        .push(Router::with_path("logout").post(auth::handlers::logout::handler))
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .push(Router::with_path("refresh").post(orders::handlers::refresh::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::handlers::get::handler)
                        .delete(orders::handlers::delete::handler)
                        .push(Router::with_path("toggle").post(orders::handlers::toggle::handler))
                        .push(Router::with_path("status").put(orders::handlers::status::handler)),
                ),
        )
}

/// Every API route, without the OpenAPI document.
pub(crate) fn api_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("login").post(auth::handlers::login::handler))
        .push(session_router())
}

/// API routes plus the OpenAPI document and Swagger UI.
pub(crate) fn app_router(state: Arc<State>) -> Router {
    let router = api_router(state);

    let doc = OpenApi::new("Orderdesk API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
