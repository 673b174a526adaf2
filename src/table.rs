//! Order Tables
//!
//! Terminal rendering of the order list and of a single order's details.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::orders::{ImageRef, Order, OrderStatus};

/// Errors that can occur when writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the order list, one row per order, in the order given.
///
/// # Errors
///
/// Returns [`TableError::IO`] if the output cannot be written.
pub fn write_orders_table<'a>(
    mut out: impl io::Write,
    orders: impl IntoIterator<Item = &'a Order>,
) -> Result<(), TableError> {
    let mut builder = Builder::default();
    let mut status_colors = Vec::new();

    builder.push_record(["ID", "Customer", "Address", "Date", "Total", "Status"]);

    for (row, order) in orders.into_iter().enumerate() {
        builder.push_record([
            order.id.short(),
            order.customer.full(),
            order.address.line(),
            order.display_date(),
            order.display_total(),
            order.display_status().to_string(),
        ]);

        if let Some(status) = order.status {
            status_colors.push((row + 1, status_color(status)));
        }
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::one(4), Alignment::right());

    for (row, color) in status_colors {
        table.modify((row, 5), color);
    }

    writeln!(out, "{table}").map_err(|_err| TableError::IO)
}

/// Write one order's contact block and cart items.
///
/// `image_url` resolves an item image to a displayable URL, when the item has one.
///
/// # Errors
///
/// Returns [`TableError::IO`] if the output cannot be written.
pub fn write_order_details(
    mut out: impl io::Write,
    order: &Order,
    image_url: impl Fn(&ImageRef) -> Option<String>,
) -> Result<(), TableError> {
    let mut contact = Builder::default();
    let fields = [
        ("Order", order.id.short()),
        ("Customer", order.customer.full()),
        ("Phone", order.contact.phone.clone()),
        ("Email", order.contact.email.clone()),
        ("Street", order.address.street.clone()),
        ("City", order.address.city.clone()),
        ("Zip code", order.address.zip_code.clone().unwrap_or_default()),
        ("Date", order.display_date()),
        ("Total", order.display_total()),
        ("Status", order.display_status().to_string()),
    ];

    for (label, value) in fields {
        contact.push_record([label.to_string(), value]);
    }

    let mut contact = contact.build();

    contact.with(Style::modern_rounded());
    contact.modify(Columns::first(), Color::BOLD);

    writeln!(out, "{contact}").map_err(|_err| TableError::IO)?;

    if order.cart_items.is_empty() {
        return writeln!(out, "No items.").map_err(|_err| TableError::IO);
    }

    let mut items = Builder::default();

    items.push_record(["Item", "Image"]);

    for item in &order.cart_items {
        let image = item
            .image
            .as_ref()
            .and_then(&image_url)
            .unwrap_or_default();

        items.push_record([item.product_name.clone(), image]);
    }

    let mut items = items.build();

    items.with(Style::modern_rounded());
    items.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{items}").map_err(|_err| TableError::IO)
}

fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::FG_YELLOW,
        OrderStatus::Dispatch => Color::FG_BLUE,
        OrderStatus::Success => Color::FG_GREEN,
    }
}
