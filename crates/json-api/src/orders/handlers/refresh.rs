//! Refresh Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{
        errors::{LOAD_FAILED_MESSAGE, into_status_error},
        models::OrdersResponse,
    },
    state::State,
};

/// Refresh Orders Handler
///
/// Re-reads the document store and returns the unfiltered list. A failed read is logged and the
/// previous list is returned.
#[endpoint(tags("orders"), summary = "Refresh Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;

    let view = state
        .app
        .orders
        .refresh_orders(session)
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED_MESSAGE))?;

    Ok(Json(view.into()))
}
