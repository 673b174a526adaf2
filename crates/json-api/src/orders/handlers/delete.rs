//! Delete Order Handler

use std::sync::Arc;

use orderdesk::orders::OrderId;
use orderdesk_app::orders::{
    OrdersServiceError,
    models::{DeleteConfirmation, DeleteOutcome, ORDER_DELETED_MESSAGE},
};
use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{
    extensions::*,
    observability::{OrderMutation, record_order_mutation},
    orders::{
        errors::{DELETE_FAILED_MESSAGE, into_status_error},
        models::DeleteResponse,
    },
    state::State,
};

/// Returned when a delete arrives without confirmation.
pub(crate) const CONFIRMATION_REQUIRED_MESSAGE: &str =
    "Are you sure? You won't be able to revert this!";

/// Delete Order Handler
///
/// Removes the order from the document store, then from the session's list. Nothing is removed
/// unless `confirm=true` is given.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Change already in progress"),
        (status_code = StatusCode::PRECONDITION_REQUIRED, description = "Deletion not confirmed"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Document store rejected the deletion"),
    ),
)]
#[tracing::instrument(name = "orders.delete", skip(order, confirm, depot), err)]
pub(crate) async fn handler(
    order: PathParam<String>,
    confirm: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<DeleteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.claims_or_401()?.session;
    let order = OrderId::new(order.into_inner());
    let confirmation = DeleteConfirmation::from(confirm.into_inner().unwrap_or(false));

    let outcome = state
        .app
        .orders
        .delete_order(session, &order, confirmation)
        .await
        .inspect_err(|error| {
            if matches!(error, OrdersServiceError::Store(_)) {
                record_order_mutation(OrderMutation::Delete, false);
            }
        })
        .map_err(|error| into_status_error(error, DELETE_FAILED_MESSAGE))?;

    match outcome {
        DeleteOutcome::Deleted => {
            record_order_mutation(OrderMutation::Delete, true);

            Ok(Json(DeleteResponse {
                message: ORDER_DELETED_MESSAGE.to_string(),
            }))
        }
        DeleteOutcome::Declined => {
            Err(StatusError::precondition_required().brief(CONFIRMATION_REQUIRED_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use orderdesk_app::{orders::MockOrdersService, store::DocumentStoreError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_SESSION, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}").delete(handler))
    }

    #[tokio::test]
    async fn test_confirmed_delete_returns_message() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .withf(|session, order, confirmation| {
                *session == TEST_SESSION
                    && order.as_str() == "order-a"
                    && *confirmation == DeleteConfirmation::Confirmed
            })
            .return_once(|_, _, _| Ok(DeleteOutcome::Deleted));

        let mut res = TestClient::delete("http://example.com/orders/order-a?confirm=true")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: DeleteResponse = res.take_json().await?;

        assert_eq!(body.message, ORDER_DELETED_MESSAGE);

        Ok(())
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_returns_428() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .withf(|_, _, confirmation| *confirmation == DeleteConfirmation::Declined)
            .return_once(|_, _, _| Ok(DeleteOutcome::Declined));

        let res = TestClient::delete("http://example.com/orders/order-a")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PRECONDITION_REQUIRED));

        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_returns_502() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_delete_order().once().return_once(|_, _, _| {
            Err(OrdersServiceError::Store(
                DocumentStoreError::UnexpectedResponse("503".to_string()),
            ))
        });

        let mut res = TestClient::delete("http://example.com/orders/order-a?confirm=true")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));
        assert!(res.take_string().await?.contains(DELETE_FAILED_MESSAGE));

        Ok(())
    }
}
