//! Orderdesk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    board::{BoardError, Expansion, OrderBoard, PendingChange},
    filter::StatusFilter,
    fixtures::{FixtureError, OrdersFixture},
    orders::{
        CartItem, CartItems, Contact, CustomerName, ImageRef, Order, OrderId, OrderStatus,
        ParseStatusError, ShippingAddress, StatusConfirmation,
    },
    table::{TableError, write_order_details, write_orders_table},
};
