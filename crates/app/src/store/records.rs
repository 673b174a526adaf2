//! Order document records as returned by the read query.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use orderdesk::orders::{
    CartItem, Contact, CustomerName, ImageRef, Order, OrderId, OrderStatus, ShippingAddress,
};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse<T> {
    pub result: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub total: Option<f64>,
    pub discount: Option<f64>,
    pub order_date: Option<String>,
    pub status: Option<String>,
    pub cart_items: Option<Vec<Option<CartItemRecord>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemRecord {
    pub product_name: Option<String>,
    pub image: Option<String>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        let status = record.status.as_deref().and_then(|raw| {
            raw.parse::<OrderStatus>()
                .inspect_err(|_err| {
                    warn!(order = %record.id, status = raw, "ignoring unknown order status");
                })
                .ok()
        });

        let ordered_at = record
            .order_date
            .as_deref()
            .and_then(|raw| parse_order_date(&record.id, raw));

        Self {
            customer: CustomerName {
                first: record.first_name.unwrap_or_default(),
                last: record.last_name.unwrap_or_default(),
            },
            contact: Contact {
                phone: record.phone.unwrap_or_default(),
                email: record.email.unwrap_or_default(),
            },
            address: ShippingAddress {
                street: record.address.unwrap_or_default(),
                city: record.city.unwrap_or_default(),
                zip_code: record.zip_code,
            },
            total: record.total.and_then(Decimal::from_f64),
            discount: record.discount.and_then(Decimal::from_f64),
            ordered_at,
            status,
            // Dangling references expand to null.
            cart_items: record
                .cart_items
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .map(|item| CartItem {
                    product_name: item.product_name.unwrap_or_default(),
                    image: item.image.map(ImageRef::new),
                })
                .collect(),
            id: OrderId::new(record.id),
        }
    }
}

fn parse_order_date(order: &str, raw: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp);
    }

    match raw
        .parse::<Date>()
        .and_then(|date| date.to_zoned(TimeZone::UTC))
    {
        Ok(zoned) => Some(zoned.timestamp()),
        Err(error) => {
            warn!(order, date = raw, %error, "ignoring unparseable order date");

            None
        }
    }
}
