use clap::Args;
use orderdesk::orders::{OrderId, OrderStatus};

use super::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Order document id
    id: String,

    /// New status (`pending`, `dispatch` or `success`)
    status: OrderStatus,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let store = args.store.open()?;
    let id = OrderId::new(args.id);

    store
        .set_order_status(&id, args.status)
        .await
        .map_err(|error| format!("Something went wrong while updating the status: {error}"))?;

    match args.status.confirmation() {
        Some(confirmation) => println!("{}: {}", confirmation.title, confirmation.text),
        None => println!("order {id} is now {}", args.status.label()),
    }

    Ok(())
}
