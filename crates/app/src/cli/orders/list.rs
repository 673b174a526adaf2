use std::io;

use clap::Args;
use orderdesk::{filter::StatusFilter, table::write_orders_table};

use super::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Only show orders with this status (`all`, `pending`, `dispatch` or `success`)
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let store = args.store.open()?;

    let orders = store
        .fetch_orders()
        .await
        .map_err(|error| format!("failed to fetch orders: {error}"))?;

    let visible: Vec<_> = args.status.apply(&orders).collect();

    if visible.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    let shown = visible.len();

    write_orders_table(io::stdout().lock(), visible)
        .map_err(|error| format!("failed to write orders: {error}"))?;

    println!("{shown} of {} orders", orders.len());

    Ok(())
}
