//! Status Filter

use std::{fmt, str::FromStr};

use crate::orders::{Order, OrderStatus, ParseStatusError};

/// Which orders the board shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every order, whatever its status
    #[default]
    All,

    /// Only orders currently in this status
    Only(OrderStatus),
}

impl StatusFilter {
    /// Every filter the operator can pick, `All` first.
    pub const CHOICES: [Self; 4] = [
        Self::All,
        Self::Only(OrderStatus::Pending),
        Self::Only(OrderStatus::Dispatch),
        Self::Only(OrderStatus::Success),
    ];

    /// Whether `order` is visible under this filter.
    ///
    /// Orders without a status only show under `All`.
    #[must_use]
    pub fn matches(self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => order.status == Some(status),
        }
    }

    /// Visible orders, in their original order.
    pub fn apply(self, orders: &[Order]) -> impl Iterator<Item = &Order> {
        orders.iter().filter(move |order| self.matches(order))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        value.parse().map(Self::Only)
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        Self::Only(status)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn order(id: &str, status: Option<OrderStatus>) -> Order {
        Order {
            id: id.into(),
            status,
            ..Order::default()
        }
    }

    fn ids<'a>(orders: impl Iterator<Item = &'a Order>) -> Vec<&'a str> {
        orders.map(|order| order.id.as_str()).collect()
    }

    #[test]
    fn all_keeps_every_order_in_order() {
        let orders = vec![
            order("c", Some(OrderStatus::Success)),
            order("a", None),
            order("b", Some(OrderStatus::Pending)),
        ];

        assert_eq!(ids(StatusFilter::All.apply(&orders)), ["c", "a", "b"]);
    }

    #[test]
    fn status_filter_keeps_exact_matches_only() {
        let orders = vec![
            order("a", Some(OrderStatus::Pending)),
            order("b", Some(OrderStatus::Dispatch)),
            order("c", None),
            order("d", Some(OrderStatus::Dispatch)),
        ];

        assert_eq!(
            ids(StatusFilter::Only(OrderStatus::Dispatch).apply(&orders)),
            ["b", "d"]
        );
        assert_eq!(
            ids(StatusFilter::Only(OrderStatus::Success).apply(&orders)),
            Vec::<&str>::new()
        );
    }

    #[test]
    fn parses_all_and_statuses() -> TestResult {
        assert_eq!("All".parse::<StatusFilter>()?, StatusFilter::All);
        assert_eq!("all".parse::<StatusFilter>()?, StatusFilter::All);
        assert_eq!(
            "pending".parse::<StatusFilter>()?,
            StatusFilter::Only(OrderStatus::Pending)
        );
        assert!("shipped".parse::<StatusFilter>().is_err());

        Ok(())
    }
}
