//! Order Status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fulfilment stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet shipped. New order documents default to this.
    Pending,

    /// Handed over for delivery.
    Dispatch,

    /// Delivered and closed.
    Success,
}

/// Message shown to the operator after a confirmed status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusConfirmation {
    /// Short heading
    pub title: &'static str,

    /// Longer description
    pub text: &'static str,
}

/// Error returned when a status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0:?}")]
pub struct ParseStatusError(pub String);

impl OrderStatus {
    /// Every status, in the order the operator picks from.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Dispatch, Self::Success];

    /// Wire value stored in the document store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatch => "dispatch",
            Self::Success => "success",
        }
    }

    /// Human label used in tables and pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Dispatch => "Dispatch",
            Self::Success => "Completed",
        }
    }

    /// Confirmation shown once a change to this status has been committed.
    ///
    /// Moving an order back to pending is silent.
    #[must_use]
    pub const fn confirmation(self) -> Option<StatusConfirmation> {
        match self {
            Self::Pending => None,
            Self::Dispatch => Some(StatusConfirmation {
                title: "Dispatch",
                text: "The order is now dispatched.",
            }),
            Self::Success => Some(StatusConfirmation {
                title: "Success",
                text: "The order has been completed.",
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "dispatch" => Ok(Self::Dispatch),
            "success" => Ok(Self::Success),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
