//! Change Order Status Handler

use std::sync::Arc;

use orderdesk::orders::{OrderId, OrderStatus};
use orderdesk_app::orders::OrdersServiceError;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    extensions::*,
    observability::{OrderMutation, record_order_mutation},
    orders::{
        errors::{STATUS_UPDATE_FAILED_MESSAGE, into_status_error},
        models::{StatusChangeRequest, StatusChangeResponse},
    },
    state::State,
};

/// Change Order Status Handler
///
/// Patches the order's status in the document store and, once the store has accepted it, in the
/// session's list.
#[endpoint(
    tags("orders"),
    summary = "Change Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Change already in progress"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Document store rejected the change"),
    ),
)]
#[tracing::instrument(
    name = "orders.status",
    skip(order, json, depot),
    fields(order = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    json: JsonBody<StatusChangeRequest>,
    depot: &mut Depot,
) -> Result<Json<StatusChangeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;
    let order = OrderId::new(order.into_inner());

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("unknown order status")?;

    let span = tracing::Span::current();

    span.record("order", tracing::field::display(&order));
    span.record("status", tracing::field::display(status));

    let change = state
        .app
        .orders
        .change_status(session, &order, status)
        .await
        .inspect(|_change| record_order_mutation(OrderMutation::Status, true))
        .inspect_err(|error| {
            if matches!(error, OrdersServiceError::Store(_)) {
                record_order_mutation(OrderMutation::Status, false);
            }
        })
        .map_err(|error| into_status_error(error, STATUS_UPDATE_FAILED_MESSAGE))?;

    Ok(Json(change.into()))
}
