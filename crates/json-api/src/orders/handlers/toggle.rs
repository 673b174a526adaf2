//! Toggle Order Handler

use std::sync::Arc;

use orderdesk::orders::OrderId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{
        errors::{LOAD_FAILED_MESSAGE, into_status_error},
        models::ToggleResponse,
    },
    state::State,
};

/// Toggle Order Handler
///
/// Opens an order's details, closing whichever order was open, or closes it if it was already
/// open.
#[endpoint(
    tags("orders"),
    summary = "Toggle Order Details",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "New expansion state"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ToggleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;

    let details = state
        .app
        .orders
        .toggle_order(session, &OrderId::new(order.into_inner()))
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED_MESSAGE))?;

    Ok(Json(details.into()))
}
