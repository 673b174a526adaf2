use std::{path::PathBuf, sync::Arc};

use clap::{Args, Subcommand, ValueEnum};
use orderdesk::orders::{Order, OrderId};
use orderdesk_app::{
    context::StoreBackend,
    store::{DEFAULT_API_VERSION, DocumentStore, SanityConfig},
};

mod delete;
mod list;
mod set_status;
mod show;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    List(list::ListOrdersArgs),
    Show(show::ShowOrderArgs),
    SetStatus(set_status::SetStatusArgs),
    Delete(delete::DeleteOrderArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(args).await,
        OrdersSubcommand::Show(args) => show::run(args).await,
        OrdersSubcommand::SetStatus(args) => set_status::run(args).await,
        OrdersSubcommand::Delete(args) => delete::run(args).await,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Sanity,
    Fixture,
}

/// Document store selection shared by every orders subcommand.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// Document store backend
    #[arg(long, env = "ORDERDESK_STORE", value_enum, default_value = "sanity")]
    store: StoreKind,

    /// YAML order fixture used by the fixture store
    #[arg(long, env = "ORDERDESK_FIXTURE", required_if_eq("store", "fixture"))]
    fixture: Option<PathBuf>,

    /// Sanity project id
    #[arg(long, env = "SANITY_PROJECT_ID", required_if_eq("store", "sanity"))]
    sanity_project_id: Option<String>,

    /// Sanity dataset
    #[arg(long, env = "SANITY_DATASET", default_value = "production")]
    sanity_dataset: String,

    /// Sanity API version
    #[arg(long, env = "SANITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    sanity_api_version: String,

    /// Sanity API token with write access
    #[arg(long, env = "SANITY_TOKEN", hide_env_values = true)]
    sanity_token: Option<String>,

    /// Override for the Sanity API origin
    #[arg(long, env = "SANITY_API_HOST")]
    sanity_api_host: Option<String>,
}

impl StoreArgs {
    fn backend(self) -> Result<StoreBackend, String> {
        match self.store {
            StoreKind::Fixture => self
                .fixture
                .map(StoreBackend::Fixture)
                .ok_or_else(|| "--fixture is required for the fixture store".to_string()),
            StoreKind::Sanity => {
                let project_id = self.sanity_project_id.ok_or_else(|| {
                    "--sanity-project-id is required for the sanity store".to_string()
                })?;

                Ok(StoreBackend::Sanity(SanityConfig {
                    project_id,
                    dataset: self.sanity_dataset,
                    api_version: self.sanity_api_version,
                    token: self.sanity_token,
                    api_host: self.sanity_api_host,
                }))
            }
        }
    }

    fn open(self) -> Result<Arc<dyn DocumentStore>, String> {
        self.backend()?
            .open()
            .map_err(|error| format!("failed to open document store: {error}"))
    }
}

async fn fetch_order(store: &dyn DocumentStore, id: &OrderId) -> Result<Order, String> {
    store
        .fetch_orders()
        .await
        .map_err(|error| format!("failed to fetch orders: {error}"))?
        .into_iter()
        .find(|order| order.id == *id)
        .ok_or_else(|| format!("order {id} not found"))
}
