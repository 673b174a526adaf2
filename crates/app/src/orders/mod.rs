//! Orders

mod errors;
pub mod models;
mod service;

pub use errors::OrdersServiceError;
pub use service::*;
