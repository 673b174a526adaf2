use clap::{Parser, Subcommand};

mod operator;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "orderdesk-app", about = "Orderdesk CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Orders(orders::OrdersCommand),
    Operator(operator::OperatorCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Orders(command) => orders::run(command).await,
            Commands::Operator(command) => operator::run(command).await,
        }
    }
}
