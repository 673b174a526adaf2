use clap::{Args, Subcommand};

mod enroll;

#[derive(Debug, Args)]
pub(crate) struct OperatorCommand {
    #[command(subcommand)]
    command: OperatorSubcommand,
}

#[derive(Debug, Subcommand)]
enum OperatorSubcommand {
    Enroll(enroll::EnrollOperatorArgs),
}

pub(crate) async fn run(command: OperatorCommand) -> Result<(), String> {
    match command.command {
        OperatorSubcommand::Enroll(args) => enroll::run(args).await,
    }
}
