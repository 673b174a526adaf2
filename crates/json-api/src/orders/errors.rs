//! Order Errors

use orderdesk_app::{orders::OrdersServiceError, store::DocumentStoreError};
use salvo::http::StatusError;
use tracing::error;

/// Shown when orders cannot be read.
pub(crate) const LOAD_FAILED_MESSAGE: &str = "Something went wrong while loading orders.";

/// Shown when the document store rejects a status change.
pub(crate) const STATUS_UPDATE_FAILED_MESSAGE: &str =
    "Something went wrong while updating the status.";

/// Shown when the document store rejects a deletion.
pub(crate) const DELETE_FAILED_MESSAGE: &str = "Something went wrong while deleting.";

/// Map an orders service error, using `failure` as the message for document store failures.
pub(crate) fn into_status_error(error: OrdersServiceError, failure: &str) -> StatusError {
    match error {
        OrdersServiceError::NotFound | OrdersServiceError::Store(DocumentStoreError::NotFound) => {
            StatusError::not_found().brief("Order not found")
        }
        OrdersServiceError::Busy => {
            StatusError::conflict().brief("A change to this order is already in progress")
        }
        OrdersServiceError::Interrupted => {
            error!("order change task did not complete");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Store(source) => {
            error!("document store rejected order change: {source}");

            StatusError::bad_gateway().brief(failure)
        }
    }
}
