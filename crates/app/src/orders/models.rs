//! Order Models

use orderdesk::{
    filter::StatusFilter,
    orders::{Order, OrderId, OrderStatus, StatusConfirmation},
};

/// Message shown once a confirmed deletion has gone through.
pub const ORDER_DELETED_MESSAGE: &str = "Your order has been deleted.";

/// Filtered slice of a session's board.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersView {
    pub filter: StatusFilter,
    pub orders: Vec<Order>,
    pub total: usize,
    pub expanded: Option<OrderId>,
}

/// Cart item with its image resolved to a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemView {
    pub product_name: String,
    pub image_url: Option<String>,
}

/// One order with everything its detail panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderItemView>,
}

/// A status change the document store has confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub order: OrderId,
    pub status: OrderStatus,
    pub confirmation: Option<StatusConfirmation>,
}

/// The operator's answer to the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

impl From<bool> for DeleteConfirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}
