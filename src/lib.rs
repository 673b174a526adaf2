//! Orderdesk
//!
//! Orderdesk is the domain core of an order-management admin service: the order model, status
//! filtering, and the per-operator order board that mirrors confirmed remote changes.

pub mod board;
pub mod filter;
pub mod fixtures;
pub mod orders;
pub mod table;

pub mod prelude;
