//! Order Index Handler

use std::sync::Arc;

use orderdesk::filter::StatusFilter;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{
        errors::{LOAD_FAILED_MESSAGE, into_status_error},
        models::OrdersResponse,
    },
    state::State,
};

/// Order Index Handler
///
/// Returns the session's orders, optionally filtered by status. The first request of a session
/// reads the document store; later ones are served from the session's copy.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders matching the filter"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;

    let filter = status
        .into_inner()
        .map(|value| value.parse::<StatusFilter>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?
        .unwrap_or_default();

    let view = state
        .app
        .orders
        .list_orders(session, filter)
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED_MESSAGE))?;

    Ok(Json(view.into()))
}
