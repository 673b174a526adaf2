//! Get Order Handler

use std::sync::Arc;

use orderdesk::orders::OrderId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{
        errors::{LOAD_FAILED_MESSAGE, into_status_error},
        models::OrderDetailsResponse,
    },
    state::State,
};

/// Get Order Handler
///
/// Returns one order with its contact details and cart items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order details"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;

    let details = state
        .app
        .orders
        .get_order(session, &OrderId::new(order.into_inner()))
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED_MESSAGE))?;

    Ok(Json(details.into()))
}
