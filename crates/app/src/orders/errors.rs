//! Orders service errors.

use orderdesk::board::BoardError;
use thiserror::Error;

use crate::store::DocumentStoreError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order already has a change in flight")]
    Busy,

    #[error("order change was interrupted")]
    Interrupted,

    #[error("document store error")]
    Store(#[from] DocumentStoreError),
}

impl From<BoardError> for OrdersServiceError {
    fn from(error: BoardError) -> Self {
        match error {
            BoardError::NotFound(_) => Self::NotFound,
            BoardError::Busy(_) => Self::Busy,
        }
    }
}
