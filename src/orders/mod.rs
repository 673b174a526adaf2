//! Orders

use std::fmt;

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use smallvec::SmallVec;

mod status;

pub use status::{OrderStatus, ParseStatusError, StatusConfirmation};

/// Number of trailing id characters shown in the short id.
const SHORT_ID_CHARS: usize = 6;

/// Opaque document identifier assigned by the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap a raw document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw document id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `#` followed by the last six characters of the id.
    #[must_use]
    pub fn short(&self) -> String {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(SHORT_ID_CHARS - 1)
            .map_or(0, |(index, _)| index);

        format!("#{}", self.0.get(start..).unwrap_or(&self.0))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Customer name as captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerName {
    /// First name
    pub first: String,

    /// Last name
    pub last: String,
}

impl CustomerName {
    /// `first last`, skipping whichever half is blank.
    #[must_use]
    pub fn full(&self) -> String {
        match (self.first.trim(), self.last.trim()) {
            ("", last) => last.to_string(),
            (first, "") => first.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }

    /// First letter of each name, used as the avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.first
            .chars()
            .next()
            .into_iter()
            .chain(self.last.chars().next())
            .collect()
    }
}

/// How to reach the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// Phone number
    pub phone: String,

    /// Email address
    pub email: String,
}

/// Where the order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    /// Street line
    pub street: String,

    /// City
    pub city: String,

    /// Postal code, absent on documents that never captured it
    pub zip_code: Option<String>,
}

impl ShippingAddress {
    /// `street, city` as shown in the order table.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{}, {}", self.street, self.city)
    }
}

/// Reference to an image asset held by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a raw asset reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The raw asset reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Product line of an order, denormalised from the referenced product document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartItem {
    /// Product name
    pub product_name: String,

    /// Product image, if the product has one
    pub image: Option<ImageRef>,
}

/// Cart items of one order.
pub type CartItems = SmallVec<[CartItem; 4]>;

/// Order document as read from the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    /// Document id
    pub id: OrderId,

    /// Customer name
    pub customer: CustomerName,

    /// Customer contact details
    pub contact: Contact,

    /// Shipping address
    pub address: ShippingAddress,

    /// Order total
    pub total: Option<Decimal>,

    /// Discount applied to the order
    pub discount: Option<Decimal>,

    /// When the order was placed
    pub ordered_at: Option<Timestamp>,

    /// Fulfilment stage; absent on documents created without one
    pub status: Option<OrderStatus>,

    /// Products in the order, in checkout order
    pub cart_items: CartItems,
}

impl Order {
    /// Total formatted in dollars; missing and zero totals both render as `$0.00`.
    #[must_use]
    pub fn display_total(&self) -> String {
        match self.total {
            Some(total) if !total.is_zero() => total
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|cents| cents.round().to_i64())
                .map_or_else(
                    || format!("${}", total.round_dp(2)),
                    |cents| Money::from_minor(cents, iso::USD).to_string(),
                ),
            _ => "$0.00".to_string(),
        }
    }

    /// Order date as `dd/mm/yyyy`, empty when unknown.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.ordered_at
            .map(|ordered_at| ordered_at.strftime("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    /// Status label, empty when the order has no status.
    #[must_use]
    pub fn display_status(&self) -> &'static str {
        self.status.map_or("", OrderStatus::label)
    }
}
