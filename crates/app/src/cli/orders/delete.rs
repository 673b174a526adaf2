use clap::Args;
use orderdesk::orders::OrderId;
use orderdesk_app::orders::models::ORDER_DELETED_MESSAGE;

use super::{StoreArgs, fetch_order};

#[derive(Debug, Args)]
pub(crate) struct DeleteOrderArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Order document id
    id: String,

    /// Confirm the deletion; without it nothing is removed
    #[arg(long)]
    yes: bool,
}

pub(crate) async fn run(args: DeleteOrderArgs) -> Result<(), String> {
    let store = args.store.open()?;
    let id = OrderId::new(args.id);

    if !args.yes {
        let order = fetch_order(store.as_ref(), &id).await?;

        println!(
            "Are you sure? You won't be able to revert this! (order {} for {})",
            order.id.short(),
            order.customer.full()
        );
        println!("re-run with --yes to delete it");

        return Ok(());
    }

    store
        .delete_order(&id)
        .await
        .map_err(|error| format!("Something went wrong while deleting: {error}"))?;

    println!("Deleted! {ORDER_DELETED_MESSAGE}");

    Ok(())
}
