use std::io;

use clap::Args;
use orderdesk::{orders::OrderId, table::write_order_details};

use super::{StoreArgs, fetch_order};

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Order document id
    id: String,
}

pub(crate) async fn run(args: ShowOrderArgs) -> Result<(), String> {
    let store = args.store.open()?;
    let order = fetch_order(store.as_ref(), &OrderId::new(args.id)).await?;

    write_order_details(io::stdout().lock(), &order, |image| store.image_url(image))
        .map_err(|error| format!("failed to write order: {error}"))
}
