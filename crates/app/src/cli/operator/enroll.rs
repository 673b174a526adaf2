use clap::Args;
use orderdesk_app::auth::{Credentials, OpenBaoClient, OpenBaoConfig, OpenBaoCredentials};

#[derive(Debug, Args)]
pub(crate) struct EnrollOperatorArgs {
    /// Operator email address
    #[arg(long)]
    email: String,

    /// Operator password
    #[arg(long, env = "ORDERDESK_OPERATOR_PASSWORD", hide_env_values = true)]
    password: String,

    /// OpenBao server address
    #[arg(long, env = "OPENBAO_ADDR")]
    openbao_addr: String,

    /// OpenBao authentication token
    #[arg(long, env = "OPENBAO_TOKEN", hide_env_values = true)]
    openbao_token: String,

    /// OpenBao Transit key name
    #[arg(long, env = "OPENBAO_TRANSIT_KEY")]
    openbao_transit_key: String,
}

pub(crate) async fn run(args: EnrollOperatorArgs) -> Result<(), String> {
    if args.email.is_empty() || args.password.is_empty() {
        return Err("email and password cannot be empty".to_string());
    }

    let client = OpenBaoClient::new(OpenBaoConfig {
        addr: args.openbao_addr,
        token: args.openbao_token,
        transit_key: args.openbao_transit_key,
    });

    let verifier = OpenBaoCredentials::enroll(&client, &Credentials::new(args.email, args.password))
        .await
        .map_err(|error| format!("failed to enroll operator: {error}"))?;

    println!("operator_verifier: {verifier}");
    println!("set ORDERDESK_OPERATOR_VERIFIER to this value on the server");

    Ok(())
}
