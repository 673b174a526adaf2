//! Order request and response bodies.

use orderdesk::orders::Order;
use orderdesk_app::orders::models::{OrderDetails, OrderItemView, OrdersView, StatusChange};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// One row of the order list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Document id
    pub id: String,

    /// Short id shown to the operator, e.g. `#a1b2c3`
    pub short_id: String,

    /// Customer first and last name
    pub customer: String,

    /// Customer initials
    pub initials: String,

    pub phone: String,

    pub email: String,

    /// Street line of the shipping address
    pub street: String,

    pub city: String,

    pub zip_code: Option<String>,

    /// Formatted total, `$0.00` when missing
    pub total: String,

    /// Discount as stored, when present
    pub discount: Option<String>,

    /// When the order was placed (RFC 3339)
    pub ordered_at: Option<String>,

    /// Order date as `dd/mm/yyyy`
    pub date: String,

    /// Wire status (`pending`, `dispatch`, `success`)
    pub status: Option<String>,

    /// Status label shown to the operator
    pub status_label: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            short_id: order.id.short(),
            customer: order.customer.full(),
            initials: order.customer.initials(),
            phone: order.contact.phone.clone(),
            email: order.contact.email.clone(),
            street: order.address.street.clone(),
            city: order.address.city.clone(),
            zip_code: order.address.zip_code.clone(),
            total: order.display_total(),
            discount: order.discount.map(|discount| discount.to_string()),
            ordered_at: order.ordered_at.map(|ordered_at| ordered_at.to_string()),
            date: order.display_date(),
            status: order.status.map(|status| status.as_str().to_string()),
            status_label: order.display_status().to_string(),
        }
    }
}

/// Filtered order list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Filter applied (`all` or a status)
    pub filter: String,

    /// Orders held by the session, before filtering
    pub total: usize,

    /// Id of the order whose details are open
    pub expanded: Option<String>,

    /// Orders matching the filter, in document store order
    pub orders: Vec<OrderResponse>,
}

impl From<OrdersView> for OrdersResponse {
    fn from(view: OrdersView) -> Self {
        Self {
            filter: view.filter.to_string().to_ascii_lowercase(),
            total: view.total,
            expanded: view.expanded.map(|id| id.to_string()),
            orders: view.orders.iter().map(OrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_name: String,

    /// Image URL, when the product has an image
    pub image_url: Option<String>,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(item: OrderItemView) -> Self {
        Self {
            product_name: item.product_name,
            image_url: item.image_url,
        }
    }
}

/// An order with its cart items.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: OrderResponse::from(&details.order),
            items: details
                .items
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
        }
    }
}

/// Result of toggling an order's details.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleResponse {
    /// Whether the order is now expanded
    pub expanded: bool,

    /// The order's details when it was opened
    pub details: Option<OrderDetailsResponse>,
}

impl From<Option<OrderDetails>> for ToggleResponse {
    fn from(details: Option<OrderDetails>) -> Self {
        Self {
            expanded: details.is_some(),
            details: details.map(OrderDetailsResponse::from),
        }
    }
}

/// Status Change Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusChangeRequest {
    /// New status (`pending`, `dispatch`, `success`)
    pub status: String,
}

/// Status Change Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusChangeResponse {
    pub order: String,
    pub status: String,

    /// Confirmation heading; absent when moving back to pending
    pub title: Option<String>,

    /// Confirmation text; absent when moving back to pending
    pub message: Option<String>,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(change: StatusChange) -> Self {
        Self {
            order: change.order.to_string(),
            status: change.status.as_str().to_string(),
            title: change
                .confirmation
                .map(|confirmation| confirmation.title.to_string()),
            message: change
                .confirmation
                .map(|confirmation| confirmation.text.to_string()),
        }
    }
}

/// Delete Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeleteResponse {
    pub message: String,
}
