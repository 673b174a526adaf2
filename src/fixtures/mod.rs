//! Fixtures
//!
//! Order documents described in YAML, used to seed the in-memory document store for local runs
//! and tests.

use std::{fs, path::Path, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::orders::{
    CartItem, Contact, CustomerName, ImageRef, Order, OrderId, OrderStatus, ShippingAddress,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid money amount
    #[error("Invalid amount for order {order}: {value}")]
    InvalidAmount {
        /// Order the amount belongs to
        order: String,

        /// Raw amount
        value: String,
    },

    /// Unknown status value
    #[error("Invalid status for order {order}: {value}")]
    InvalidStatus {
        /// Order the status belongs to
        order: String,

        /// Raw status
        value: String,
    },

    /// Unparseable order timestamp
    #[error("Invalid order date for order {order}: {value}")]
    InvalidDate {
        /// Order the date belongs to
        order: String,

        /// Raw date
        value: String,
    },

    /// Two orders share an id
    #[error("Duplicate order id: {0}")]
    DuplicateOrder(String),
}

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Orders, in the order the store returns them
    pub orders: Vec<OrderFixture>,
}

/// Order definition from YAML fixtures
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Document id
    pub id: String,

    /// Customer first name
    #[serde(default)]
    pub first_name: String,

    /// Customer last name
    #[serde(default)]
    pub last_name: String,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Street line
    #[serde(default)]
    pub street: String,

    /// City
    #[serde(default)]
    pub city: String,

    /// Postal code
    pub zip_code: Option<String>,

    /// Order total as a decimal string (e.g. "129.99")
    pub total: Option<String>,

    /// Discount as a decimal string
    pub discount: Option<String>,

    /// RFC 3339 timestamp
    pub ordered_at: Option<String>,

    /// Status wire value
    pub status: Option<String>,

    /// Cart items
    #[serde(default)]
    pub items: Vec<ItemFixture>,
}

/// Cart item definition from YAML fixtures
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Product name
    pub name: String,

    /// Image asset reference
    pub image: Option<String>,
}

impl OrdersFixture {
    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse fixture YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Convert every fixture into an [`Order`], keeping file order.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid amounts, statuses or dates, or on duplicate ids.
    pub fn into_orders(self) -> Result<Vec<Order>, FixtureError> {
        let mut orders: Vec<Order> = Vec::with_capacity(self.orders.len());

        for fixture in self.orders {
            if orders.iter().any(|order| order.id.as_str() == fixture.id) {
                return Err(FixtureError::DuplicateOrder(fixture.id));
            }

            orders.push(fixture.try_into()?);
        }

        Ok(orders)
    }
}

impl TryFrom<OrderFixture> for Order {
    type Error = FixtureError;

    fn try_from(fixture: OrderFixture) -> Result<Self, Self::Error> {
        let total = parse_amount(&fixture.id, fixture.total.as_deref())?;
        let discount = parse_amount(&fixture.id, fixture.discount.as_deref())?;

        let ordered_at = fixture
            .ordered_at
            .as_deref()
            .map(|value| {
                value
                    .parse::<Timestamp>()
                    .map_err(|_err| FixtureError::InvalidDate {
                        order: fixture.id.clone(),
                        value: value.to_string(),
                    })
            })
            .transpose()?;

        let status = fixture
            .status
            .as_deref()
            .map(|value| {
                OrderStatus::from_str(value).map_err(|_err| FixtureError::InvalidStatus {
                    order: fixture.id.clone(),
                    value: value.to_string(),
                })
            })
            .transpose()?;

        Ok(Order {
            id: OrderId::new(fixture.id),
            customer: CustomerName {
                first: fixture.first_name,
                last: fixture.last_name,
            },
            contact: Contact {
                phone: fixture.phone,
                email: fixture.email,
            },
            address: ShippingAddress {
                street: fixture.street,
                city: fixture.city,
                zip_code: fixture.zip_code,
            },
            total,
            discount,
            ordered_at,
            status,
            cart_items: fixture
                .items
                .into_iter()
                .map(|item| CartItem {
                    product_name: item.name,
                    image: item.image.map(ImageRef::new),
                })
                .collect(),
        })
    }
}

fn parse_amount(order: &str, value: Option<&str>) -> Result<Option<Decimal>, FixtureError> {
    value
        .map(|value| {
            Decimal::from_str(value.trim()).map_err(|_err| FixtureError::InvalidAmount {
                order: order.to_string(),
                value: value.to_string(),
            })
        })
        .transpose()
}
