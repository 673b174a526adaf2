//! Document store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("document not found")]
    NotFound,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from document store: {0}")]
    UnexpectedResponse(String),
}
